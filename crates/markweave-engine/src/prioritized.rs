/// A value registered with a numeric priority. Lower priorities are tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prioritized<T> {
    pub priority: i32,
    pub value: T,
}

/// Shorthand for building a [`Prioritized`] registration.
pub fn prioritized<T>(value: T, priority: i32) -> Prioritized<T> {
    Prioritized { priority, value }
}

/// Sorts by ascending priority; equal priorities keep registration order.
pub fn sort_by_priority<T>(items: &mut [Prioritized<T>]) {
    items.sort_by_key(|p| p.priority);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_is_stable_for_ties() {
        let mut items = vec![
            prioritized("c", 300),
            prioritized("a1", 100),
            prioritized("b", 200),
            prioritized("a2", 100),
        ];
        sort_by_priority(&mut items);
        let order: Vec<_> = items.iter().map(|p| p.value).collect();
        assert_eq!(order, ["a1", "a2", "b", "c"]);
    }
}
