//! Turning typed text into core inputs.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use donatelife_core::application::NewDonor;

use crate::{
    cli::DonorFields,
    error::{CliError, CliResult},
};

/// Parse `YYYY-MM-DD` as the start of that day in UTC.
pub fn parse_date(input: &str) -> CliResult<DateTime<Utc>> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(|day| day.and_time(NaiveTime::default()).and_utc())
        .map_err(|_| CliError::InvalidDate {
            input: input.to_string(),
        })
}

/// Blank means "no address".
pub fn email(input: Option<&str>) -> Option<String> {
    input
        .filter(|e| !e.trim().is_empty())
        .map(ToString::to_string)
}

impl DonorFields {
    /// The requested last donation date, if one was typed.
    pub fn last_donation_date(&self) -> CliResult<Option<DateTime<Utc>>> {
        self.last_donation.as_deref().map(parse_date).transpose()
    }

    /// The registration form these fields describe.
    pub fn to_new_donor(&self) -> CliResult<NewDonor> {
        let mut new = NewDonor::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.blood_type.clone(),
            self.phone.clone(),
            self.city.clone(),
        )
        .active(!self.inactive);
        new.email = email(self.email.as_deref());
        if let Some(date) = self.last_donation_date()? {
            new = new.last_donation_date(date);
        }
        Ok(new)
    }
}
