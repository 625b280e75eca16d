//! Row-parallel iteration over row-major buffers.

use rayon::prelude::*;


/// Multiplier for number of chunks relative to CPU threads.
/// Using 3x threads provides good load balancing when some chunks finish faster.
const CHUNKS_PER_THREAD: usize = 3;

/// Rows per chunk for a buffer of `height` rows.
#[inline]
fn auto_chunk_rows(height: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (height / num_chunks).max(1)
}

/// Split `data` into mutable chunks of whole rows.
///
/// Yields `(chunk_start_row, chunk)` pairs; every chunk length is a multiple of `width`.
pub fn par_rows_mut<T: Send>(
    data: &mut [T],
    width: usize,
) -> impl IndexedParallelIterator<Item = (usize, &mut [T])> {
    assert!(width > 0, "width must be positive");
    assert_eq!(data.len() % width, 0, "buffer is not row-aligned");
    let chunk_rows = auto_chunk_rows(data.len() / width);
    data.par_chunks_mut(width * chunk_rows)
        .enumerate()
        .map(move |(idx, chunk)| (idx * chunk_rows, chunk))
}

/// Like [`par_rows_mut`] over two equally sized buffers split at the same rows.
pub fn par_rows2_mut<'a, A: Send, B: Send>(
    a: &'a mut [A],
    b: &'a mut [B],
    width: usize,
) -> impl IndexedParallelIterator<Item = (usize, &'a mut [A], &'a mut [B])> {
    assert!(width > 0, "width must be positive");
    assert_eq!(a.len(), b.len(), "Zipped slices must have equal length");
    assert_eq!(a.len() % width, 0, "buffer is not row-aligned");
    let chunk_rows = auto_chunk_rows(a.len() / width);
    let chunk_size = width * chunk_rows;
    a.par_chunks_mut(chunk_size)
        .zip(b.par_chunks_mut(chunk_size))
        .enumerate()
        .map(move |(idx, (ca, cb))| (idx * chunk_rows, ca, cb))
}

/// Calls `f(y, row)` for every row of `data`, rows processed in parallel.
pub fn par_for_each_row<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    par_rows_mut(data, width).for_each(|(start_row, chunk)| {
        for (local_y, row) in chunk.chunks_exact_mut(width).enumerate() {
            f(start_row + local_y, row);
        }
    });
}
