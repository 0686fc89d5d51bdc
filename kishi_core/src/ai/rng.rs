/// 一様な添字を返す乱数源。
///
/// テストでは決まった添字を返す実装に差し替えられる。
pub trait RandomSource {
    /// `0..len` から一様に1つ返す。`len` は 1 以上であること。
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    #[inline]
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}
