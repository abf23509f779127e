use common::BookingNo;
use rand::Rng;

/// Source of candidate booking numbers.
///
/// Candidates are not guaranteed unique; the store's unique constraint is the
/// arbiter and a collision makes the caller ask for another one.
pub trait BookingNumberGenerator: Send + Sync {
    fn generate(&self) -> BookingNo;
}

/// Draws six characters uniformly from `A-Z0-9` (36^6 combinations).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBookingNumbers;

impl BookingNumberGenerator for RandomBookingNumbers {
    fn generate(&self) -> BookingNo {
        let mut rng = rand::thread_rng();
        let code: String = (0..BookingNo::LENGTH)
            .map(|_| {
                let index = rng.gen_range(0..BookingNo::ALPHABET.len());
                char::from(BookingNo::ALPHABET[index])
            })
            .collect();
        BookingNo::new(code)
    }
}
