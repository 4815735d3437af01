/// Engine time in seconds.
///
/// The only timebase the engine knows about. Wall-clock time never enters
/// the core, so passes stay recordable and replayable.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn seconds(self) -> f64 {
        self.0
    }
}
