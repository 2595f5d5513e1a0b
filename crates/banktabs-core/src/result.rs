use crate::error::BankTabsError;

pub type BankTabsResult<T> = Result<T, BankTabsError>;
