use rayon::prelude::*;

use crate::{
    foundation::error::{DotfieldError, DotfieldResult},
    foundation::rng::Rng64,
    pixels::buffer::PixelBuffer,
};

/// Fixed k-means iteration count. The palette converges visually well
/// before this on photographic input; more iterations buy nothing a user
/// can see.
pub const KMEANS_ITERATIONS: usize = 10;

/// One cluster-center color of a quantized palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Centroid {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Reduce `buffer` to at most `k` representative colors via k-means in RGB
/// space.
///
/// Initialization samples `k` pixels uniformly at random (with replacement)
/// from the injected generator, so a fixed seed replays the exact palette.
/// Each of the [`KMEANS_ITERATIONS`] rounds assigns every pixel to its
/// nearest centroid (squared Euclidean distance, ties to the lowest index)
/// and recomputes centers as cluster means; an empty cluster keeps its
/// previous value for that round. The result is truncated to
/// `min(k, len)` - a no-op today since centroids never shrink, but part of
/// the documented contract. No global optimality is guaranteed.
///
/// `k == 0` returns an empty palette; an empty buffer is
/// [`DotfieldError::InvalidInput`].
#[tracing::instrument(skip(buffer, rng), fields(pixels = buffer.pixel_count()))]
pub fn quantize(buffer: &PixelBuffer, k: u32, rng: &mut Rng64) -> DotfieldResult<Vec<Centroid>> {
    if k == 0 {
        return Ok(Vec::new());
    }
    if buffer.is_empty() {
        return Err(DotfieldError::invalid_input(
            "cannot quantize an empty pixel buffer",
        ));
    }

    let pixels = buffer.data();
    let pixel_count = buffer.pixel_count();
    let k = k as usize;

    // Centers carried in f64 so means do not quantize between iterations.
    let mut centers: Vec<[f64; 3]> = (0..k)
        .map(|_| {
            let idx = (rng.next_u64() % pixel_count as u64) as usize * 4;
            [
                f64::from(pixels[idx]),
                f64::from(pixels[idx + 1]),
                f64::from(pixels[idx + 2]),
            ]
        })
        .collect();

    for _ in 0..KMEANS_ITERATIONS {
        let (counts, sums) = pixels
            .par_chunks_exact(4)
            .fold(
                || (vec![0u64; k], vec![[0f64; 3]; k]),
                |(mut counts, mut sums), px| {
                    let i = nearest_center(&centers, px);
                    counts[i] += 1;
                    sums[i][0] += f64::from(px[0]);
                    sums[i][1] += f64::from(px[1]);
                    sums[i][2] += f64::from(px[2]);
                    (counts, sums)
                },
            )
            .reduce(
                || (vec![0u64; k], vec![[0f64; 3]; k]),
                |(mut ca, mut sa), (cb, sb)| {
                    for i in 0..k {
                        ca[i] += cb[i];
                        sa[i][0] += sb[i][0];
                        sa[i][1] += sb[i][1];
                        sa[i][2] += sb[i][2];
                    }
                    (ca, sa)
                },
            );

        for i in 0..k {
            if counts[i] > 0 {
                let n = counts[i] as f64;
                centers[i] = [sums[i][0] / n, sums[i][1] / n, sums[i][2] / n];
            }
            // Empty cluster: keep the previous center for this round.
        }
    }

    centers.truncate(k.min(centers.len()));
    Ok(centers
        .into_iter()
        .map(|c| Centroid {
            r: c[0].round().clamp(0.0, 255.0) as u8,
            g: c[1].round().clamp(0.0, 255.0) as u8,
            b: c[2].round().clamp(0.0, 255.0) as u8,
        })
        .collect())
}

fn nearest_center(centers: &[[f64; 3]], px: &[u8]) -> usize {
    let (r, g, b) = (f64::from(px[0]), f64::from(px[1]), f64::from(px[2]));
    let mut best = 0usize;
    let mut best_d = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = (r - c[0]).powi(2) + (g - c[1]).powi(2) + (b - c[2]).powi(2);
        // Strict comparison keeps ties on the lowest centroid index.
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}
