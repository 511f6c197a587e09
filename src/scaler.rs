use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed source row/column for every destination pixel of a
/// nearest-neighbour stretch. Hard strip edges stay hard.
#[derive(Debug, Clone, Default)]
pub struct Upscaler {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
}

impl Upscaler {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            src_x: axis(dst_w, src_w),
            src_y: axis(dst_h, src_h),
        }
    }

    /// Destination size this table was built for.
    pub fn dst_size(&self) -> (usize, usize) {
        (self.src_x.len(), self.src_y.len())
    }

    /// Stretch `src` (rows of `sw` pixels) over `dst` (rows of `dw`).
    /// Rows are filled in parallel.
    pub fn blit(&self, dst: &mut [u32], dw: usize, src: &[u32], sw: usize) {
        if dw == 0 || sw == 0 || dw != self.src_x.len() {
            return;
        }
        dst.par_chunks_mut(dw)
            .zip(self.src_y.par_iter())
            .for_each(|(dst_row, &sy)| {
                let row = &src[sy * sw..(sy + 1) * sw];
                for (d, &sx) in dst_row.iter_mut().zip(&self.src_x) {
                    *d = row[sx];
                }
            });
    }
}

fn axis(dst: usize, src: usize) -> Vec<usize> {
    if src == 0 {
        return vec![0; dst];
    }
    let step = src as f64 / dst as f64;
    (0..dst)
        .map(|i| ((i as f64 * step) as usize).min(src - 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_each_pixel() {
        let src = vec![1, 2, 3, 4];
        let up = Upscaler::new(4, 4, 2, 2);
        let mut dst = vec![0; 16];
        up.blit(&mut dst, 4, &src, 2);
        assert_eq!(
            dst,
            vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn identity_and_shrink() {
        let src: Vec<u32> = (0..6).collect();
        let same = Upscaler::new(3, 2, 3, 2);
        let mut dst = vec![0; 6];
        same.blit(&mut dst, 3, &src, 3);
        assert_eq!(dst, src);

        let half = Upscaler::new(1, 1, 3, 2);
        let mut dst = vec![9; 1];
        half.blit(&mut dst, 1, &src, 3);
        assert_eq!(dst, vec![0]);
    }

    #[test]
    fn mismatched_width_is_ignored() {
        let up = Upscaler::new(4, 4, 2, 2);
        let mut dst = vec![7; 9];
        up.blit(&mut dst, 3, &[1, 2, 3, 4], 2);
        assert_eq!(dst, vec![7; 9]);
        assert_eq!(up.dst_size(), (4, 4));
    }
}
