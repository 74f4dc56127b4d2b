pub mod contact;
pub mod submission;
pub mod validation;
pub mod work_with_us;
