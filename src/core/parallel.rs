//! Fork-join helper used while a MIP map is built.
//!
//! Work is handed to the rayon pool the caller runs on (the global
//! pool, or a dedicated one via `ThreadPool::install`).

// others
use rayon::prelude::*;

// see parallel.h

/// Split *data* into consecutive chunks of *stride* elements and call
/// *body(scratch, index, chunk)* for every chunk, in parallel. A task
/// processes at least *chunk_size* chunks, and every task gets its own
/// scratch value created by *init*, so no state is shared between
/// tasks.
pub fn parallel_for<T, S, I, F>(data: &mut [T], stride: usize, chunk_size: usize, init: I, body: F)
where
    T: Send,
    I: Fn() -> S + Sync + Send,
    F: Fn(&mut S, usize, &mut [T]) + Sync + Send,
{
    assert!(stride > 0, "parallel_for needs a positive stride");
    assert!(chunk_size > 0, "parallel_for needs a positive chunk size");
    data.par_chunks_mut(stride)
        .with_min_len(chunk_size)
        .enumerate()
        .for_each_init(init, |scratch, (index, chunk)| body(scratch, index, chunk));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_chunk_is_visited_once() {
        let stride: usize = 7;
        let mut data: Vec<usize> = vec![0; stride * 100];
        parallel_for(&mut data, stride, 16, || (), |_, row, chunk| {
            for (i, v) in chunk.iter_mut().enumerate() {
                *v += row * stride + i;
            }
        });
        for (i, v) in data.iter().enumerate() {
            assert_eq!(*v, i);
        }
    }

    #[test]
    fn scratch_is_per_task() {
        let mut data: Vec<u32> = vec![1; 4 * 64];
        parallel_for(&mut data, 4, 1, || vec![0_u32; 4], |scratch, _, chunk| {
            for (s, v) in scratch.iter_mut().zip(chunk.iter()) {
                *s = v * 3;
            }
            chunk.copy_from_slice(scratch);
        });
        assert!(data.iter().all(|&v| v == 3));
    }
}
