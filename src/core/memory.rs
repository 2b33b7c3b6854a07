//! **BlockedArray** stores a 2D grid of values in square blocks of
//! `BLOCK_SIZE` x `BLOCK_SIZE` entries, so that texels which are
//! close to each other in *(u,v)* are usually close in memory, too.
//! Filtering a MIP map touches neighborhoods of texels, which is
//! why each pyramid level lives in one of these.

// std
use std::ops::{Index, IndexMut};
// others
use num;

// see memory.h

const LOG_BLOCK_SIZE: usize = 3;
const BLOCK_SIZE: usize = 1 << LOG_BLOCK_SIZE;

fn round_up(x: usize) -> usize {
    (x + BLOCK_SIZE - 1) & !(BLOCK_SIZE - 1)
}

#[derive(Debug, Clone, Default)]
pub struct BlockedArray<T> {
    pub data: Vec<T>,
    pub u_res: usize,
    pub v_res: usize,
    pub u_blocks: usize,
}

impl<T> BlockedArray<T>
where
    T: num::Zero + Clone,
{
    pub fn new(u_res: usize, v_res: usize) -> BlockedArray<T> {
        let data = vec![num::Zero::zero(); round_up(u_res) * round_up(v_res)];
        BlockedArray {
            u_res,
            v_res,
            u_blocks: round_up(u_res) >> LOG_BLOCK_SIZE,
            data,
        }
    }
    /// Fill the array by calling *f(u, v)* once per entry.
    pub fn from_fn<F>(u_res: usize, v_res: usize, f: F) -> BlockedArray<T>
    where
        F: Fn(usize, usize) -> T,
    {
        let mut ba = Self::new(u_res, v_res);
        for v in 0..v_res {
            for u in 0..u_res {
                ba[(u, v)] = f(u, v);
            }
        }
        ba
    }
    /// Copy a row-major slice (`d[v * u_res + u]`).
    pub fn new_from(u_res: usize, v_res: usize, d: &[T]) -> BlockedArray<T> {
        assert_eq!(d.len(), u_res * v_res);
        Self::from_fn(u_res, v_res, |u, v| d[v * u_res + u].clone())
    }
    /// Copy a column-major slice (`d[u * v_res + v]`).
    pub fn new_from_columns(u_res: usize, v_res: usize, d: &[T]) -> BlockedArray<T> {
        assert_eq!(d.len(), u_res * v_res);
        Self::from_fn(u_res, v_res, |u, v| d[u * v_res + v].clone())
    }
}

impl<T> BlockedArray<T> {
    pub fn u_size(&self) -> usize {
        self.u_res
    }
    pub fn v_size(&self) -> usize {
        self.v_res
    }
    pub fn block(&self, a: usize) -> usize {
        a >> LOG_BLOCK_SIZE
    }
    pub fn offset(&self, a: usize) -> usize {
        a & (BLOCK_SIZE - 1)
    }
    fn linear_index(&self, u: usize, v: usize) -> usize {
        assert!(
            u < self.u_res && v < self.v_res,
            "({}, {}) outside of {}x{} array",
            u,
            v,
            self.u_res,
            self.v_res
        );
        let bu = self.block(u);
        let bv = self.block(v);
        let ou = self.offset(u);
        let ov = self.offset(v);
        BLOCK_SIZE * BLOCK_SIZE * (self.u_blocks * bv + bu) + BLOCK_SIZE * ov + ou
    }
}

impl<T> Index<(usize, usize)> for BlockedArray<T> {
    type Output = T;
    fn index(&self, i: (usize, usize)) -> &T {
        let (u, v) = i;
        &self.data[self.linear_index(u, v)]
    }
}

impl<T> IndexMut<(usize, usize)> for BlockedArray<T> {
    fn index_mut(&mut self, i: (usize, usize)) -> &mut T {
        let (u, v) = i;
        let offset = self.linear_index(u, v);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::pbrt::Float;

    #[test]
    fn row_major_round_trip_through_blocks() {
        let (u_res, v_res) = (11_usize, 5_usize);
        let d: Vec<Float> = (0..u_res * v_res).map(|i| i as Float).collect();
        let ba = BlockedArray::new_from(u_res, v_res, &d);
        assert_eq!(ba.u_size(), 11);
        assert_eq!(ba.v_size(), 5);
        // storage is padded to whole blocks
        assert_eq!(ba.data.len(), 16 * 8);
        for v in 0..v_res {
            for u in 0..u_res {
                assert_eq!(ba[(u, v)], (v * u_res + u) as Float);
            }
        }
    }

    #[test]
    fn columns_match_rows() {
        let (u_res, v_res) = (3_usize, 9_usize);
        let rows: Vec<Float> = (0..u_res * v_res).map(|i| i as Float).collect();
        let mut columns: Vec<Float> = vec![0.0; u_res * v_res];
        for v in 0..v_res {
            for u in 0..u_res {
                columns[u * v_res + v] = rows[v * u_res + u];
            }
        }
        let a = BlockedArray::new_from(u_res, v_res, &rows);
        let b = BlockedArray::new_from_columns(u_res, v_res, &columns);
        for v in 0..v_res {
            for u in 0..u_res {
                assert_eq!(a[(u, v)], b[(u, v)]);
            }
        }
    }

    #[test]
    #[should_panic]
    fn index_outside_panics() {
        let ba: BlockedArray<Float> = BlockedArray::new(4, 4);
        let _texel: Float = ba[(4, 0)];
    }
}
