/// Outbound "go back to the previous screen" call.
///
/// Carries no parameters and expects no result. Leaving the screen drops the
/// controller along with any unsaved draft.
pub trait Navigator {
    fn go_back(&mut self);
}
