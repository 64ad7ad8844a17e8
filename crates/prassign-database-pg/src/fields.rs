use std::ops::Deref;

use prassign_models::PullRequestStatus;
use sqlx::{
    postgres::{PgTypeInfo, PgValueRef},
    Decode, Postgres, Type,
};

pub struct PullRequestStatusDecode(PullRequestStatus);
impl<'r> Decode<'r, Postgres> for PullRequestStatusDecode {
    fn decode(value: PgValueRef) -> core::result::Result<Self, sqlx::error::BoxDynError> {
        let str_value = <&str as Decode<Postgres>>::decode(value)?;
        PullRequestStatus::try_from(str_value)
            .map(Self)
            .map_err(Into::into)
    }
}

impl Type<Postgres> for PullRequestStatusDecode {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("varchar")
    }
}

impl Deref for PullRequestStatusDecode {
    type Target = PullRequestStatus;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<PullRequestStatusDecode> for PullRequestStatus {
    fn from(v: PullRequestStatusDecode) -> Self {
        v.0
    }
}
