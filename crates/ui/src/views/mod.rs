mod quiz;
mod select_user;

pub use quiz::QuizView;
pub use select_user::UserPicker;

#[cfg(test)]
pub(crate) use quiz::QuizTestHandles;

#[cfg(test)]
mod intent_smoke;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
