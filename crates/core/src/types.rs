/// All server-side primary keys are bigserial integers.
pub type DbId = i64;
