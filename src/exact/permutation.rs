/// Rearranges `items` into the next permutation in lexicographic order.
///
/// Returns `false` (leaving `items` untouched) when `items` is already the
/// last permutation, i.e. sorted in non-increasing order.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::next_permutation;
///
/// let mut p = [1, 2, 3];
/// assert!(next_permutation(&mut p));
/// assert_eq!(p, [1, 3, 2]);
///
/// let mut last = [3, 2, 1];
/// assert!(!next_permutation(&mut last));
/// assert_eq!(last, [3, 2, 1]);
/// ```
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    // longest non-increasing suffix starts at i
    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let pivot = i - 1;
    let mut j = n - 1;
    while items[j] <= items[pivot] {
        j -= 1;
    }
    items.swap(pivot, j);
    items[i..].reverse();
    true
}
