use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;

/// Tile grid used for local contrast equalization.
const TILE_GRID: u32 = 8;

/// Histogram clip limit, as a multiple of the uniform bin height.
const CLIP_LIMIT: f32 = 2.0;

/// Sigma implied by a 21x21 Gaussian window: 0.3 * ((21 - 1) * 0.5 - 1) + 0.8.
const THRESHOLD_SIGMA: f32 = 3.5;

/// Offset subtracted from the local mean before comparing.
const THRESHOLD_OFFSET: i16 = 10;

/// Contrast-limited local histogram equalization over an 8x8 tile grid.
/// Each tile gets a clipped-histogram lookup table and every pixel blends
/// the four nearest tile tables bilinearly, so tile borders do not show up
/// as hard steps.
pub fn equalize_local_contrast(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let tile_w = width / TILE_GRID;
    let tile_h = height / TILE_GRID;
    if tile_w == 0 || tile_h == 0 {
        return gray.clone();
    }

    let data = gray.as_raw();
    let grid = TILE_GRID as usize;

    let mut maps = vec![[0u8; 256]; grid * grid];
    for ty in 0..TILE_GRID {
        for tx in 0..TILE_GRID {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            // Edge tiles absorb the remainder columns/rows.
            let x1 = if tx == TILE_GRID - 1 { width } else { x0 + tile_w };
            let y1 = if ty == TILE_GRID - 1 { height } else { y0 + tile_h };
            maps[(ty * TILE_GRID + tx) as usize] = tile_mapping(data, width, x0, y0, x1, y1);
        }
    }

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let level = data[(y * width + x) as usize] as usize;

            let fx = (x as f32 + 0.5) / tile_w as f32 - 0.5;
            let fy = (y as f32 + 0.5) / tile_h as f32 - 0.5;
            let bx = fx.floor() as i32;
            let by = fy.floor() as i32;
            let tx0 = bx.clamp(0, TILE_GRID as i32 - 1) as usize;
            let tx1 = (bx + 1).clamp(0, TILE_GRID as i32 - 1) as usize;
            let ty0 = by.clamp(0, TILE_GRID as i32 - 1) as usize;
            let ty1 = (by + 1).clamp(0, TILE_GRID as i32 - 1) as usize;
            let ax = fx - fx.floor();
            let ay = fy - fy.floor();

            let top = maps[ty0 * grid + tx0][level] as f32 * (1.0 - ax)
                + maps[ty0 * grid + tx1][level] as f32 * ax;
            let bottom = maps[ty1 * grid + tx0][level] as f32 * (1.0 - ax)
                + maps[ty1 * grid + tx1][level] as f32 * ax;
            let value = top * (1.0 - ay) + bottom * ay;

            out.put_pixel(x, y, Luma([value.round().clamp(0.0, 255.0) as u8]));
        }
    }

    out
}

/// Builds the equalization lookup table for one tile: clip the histogram,
/// hand the excess back evenly, then map through the cumulative distribution.
fn tile_mapping(data: &[u8], stride: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> [u8; 256] {
    let mut hist = [0u32; 256];
    for y in y0..y1 {
        for x in x0..x1 {
            hist[data[(y * stride + x) as usize] as usize] += 1;
        }
    }

    let pixels = ((x1 - x0) * (y1 - y0)) as f32;
    let clip = ((CLIP_LIMIT * pixels / 256.0) as u32).max(1);
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }
    let share = excess / 256;
    let remainder = (excess % 256) as usize;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += share + u32::from(i < remainder);
    }

    let mut cdf = [0u32; 256];
    let mut running = 0u32;
    for (i, &bin) in hist.iter().enumerate() {
        running += bin;
        cdf[i] = running;
    }
    let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);
    let denom = running.saturating_sub(cdf_min);

    let mut map = [0u8; 256];
    for (i, slot) in map.iter_mut().enumerate() {
        *slot = if denom == 0 {
            i as u8
        } else {
            let scaled = cdf[i].saturating_sub(cdf_min) as f32 / denom as f32 * 255.0;
            scaled.min(255.0) as u8
        };
    }
    map
}

/// Binarizes dark strokes on a light background into a white-on-black mask.
/// Each pixel is compared against its Gaussian-weighted local mean minus a
/// fixed offset; pixels at or below the cut become foreground.
pub fn threshold_strokes(gray: &GrayImage) -> GrayImage {
    let local_mean = gaussian_blur_f32(gray, THRESHOLD_SIGMA);

    let mut mask = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        let cut = local_mean.get_pixel(x, y)[0] as i16 - THRESHOLD_OFFSET;
        let value: u8 = if (pixel[0] as i16) <= cut { 255 } else { 0 };
        mask.put_pixel(x, y, Luma([value]));
    }
    mask
}

/// Morphological closing with a 3x3 rectangular structuring element,
/// bridging small gaps inside digit strokes.
pub fn close_gaps(mask: &GrayImage) -> GrayImage {
    close(mask, Norm::LInf, 1)
}
