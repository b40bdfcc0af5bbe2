/// Read/write roles over a pair of resources. The write side is always the
/// other slot, so one step can never read and write the same resource.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PingPongState {
    read_idx: usize,
}

impl PingPongState {
    pub fn new() -> Self {
        Self { read_idx: 0 }
    }

    pub fn read_idx(&self) -> usize {
        self.read_idx
    }

    pub fn write_idx(&self) -> usize {
        (self.read_idx + 1) % 2
    }

    pub fn swap(&mut self) {
        self.read_idx = self.write_idx();
    }

    /// Borrows `(read, write)` out of a pair.
    pub fn split<'a, T>(&self, pair: &'a [T; 2]) -> (&'a T, &'a T) {
        (&pair[self.read_idx()], &pair[self.write_idx()])
    }

    pub fn split_mut<'a, T>(&self, pair: &'a mut [T; 2]) -> (&'a T, &'a mut T) {
        let [first, second] = pair;

        if self.read_idx == 0 {
            (&*first, second)
        } else {
            (&*second, first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_write_never_alias() {
        let mut ping_pong = PingPongState::new();

        for _ in 0..5 {
            assert_ne!(ping_pong.read_idx(), ping_pong.write_idx());
            ping_pong.swap();
        }
    }

    #[test]
    fn swap_alternates() {
        let mut ping_pong = PingPongState::new();
        let pair = ["a", "b"];

        assert_eq!(ping_pong.split(&pair), (&"a", &"b"));
        ping_pong.swap();
        assert_eq!(ping_pong.split(&pair), (&"b", &"a"));
        ping_pong.swap();
        assert_eq!(ping_pong.read_idx(), 0);
    }

    #[test]
    fn split_mut_writes_other_slot() {
        let mut ping_pong = PingPongState::new();
        let mut pair = [1, 2];
        ping_pong.swap();

        let (read, write) = ping_pong.split_mut(&mut pair);
        *write = *read * 10;

        assert_eq!(pair, [20, 2]);
    }
}
