//! Polarity scoring for short comment texts.

pub mod vader;

pub use vader::VaderScorer;

/// Maps a text onto a polarity in `[-1.0, 1.0]`.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

impl<T: PolarityScorer + ?Sized> PolarityScorer for &T {
    fn polarity(&self, text: &str) -> f64 {
        (**self).polarity(text)
    }
}
