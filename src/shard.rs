/// Splits `items` into exactly `n` contiguous shards whose sizes differ by at most one.
///
/// The first `len % n` shards carry the extra element. Trailing shards may be empty
/// when `n` exceeds the input length. `n == 0` is treated as a single shard.
pub fn split_into_shards<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    let n = n.max(1);
    let base = items.len() / n;
    let extra = items.len() % n;

    let mut shards = Vec::with_capacity(n);
    let mut start = 0;
    for i in 0..n {
        let size = base + usize::from(i < extra);
        shards.push(items[start..start + size].to_vec());
        start += size;
    }
    shards
}
