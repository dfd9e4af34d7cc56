//! `donatelife validate` - check donor details without a registry.

use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use donatelife_adapters::SystemClock;
use donatelife_core::{
    application::ports::Clock,
    domain::{DonationDateError, Donor, DonorValidator, ValidationError},
};

use crate::{
    cli::{DonorFields, OutputFormat},
    error::{CliError, CliResult},
    input,
    output::OutputManager,
    render,
};

#[derive(Debug, Serialize)]
struct Report {
    valid: bool,
    eligible: bool,
    violations: Vec<Violation>,
}

#[derive(Debug, Serialize)]
struct Violation {
    field: &'static str,
    message: String,
}

#[instrument(skip_all)]
pub fn execute(fields: DonorFields, output: OutputManager) -> CliResult<()> {
    check(fields, &SystemClock::new(), &output)
}

fn check(fields: DonorFields, clock: &dyn Clock, output: &OutputManager) -> CliResult<()> {
    let now = clock.now();
    let date = fields.last_donation_date()?;

    let mut donor = Donor::new(
        Uuid::new_v4(),
        fields.first_name,
        fields.last_name,
        fields.blood_type,
        input::email(fields.email.as_deref()),
        fields.phone,
        fields.city,
    );
    donor.set_active(!fields.inactive);

    let mut violations = donor.validate(now);
    if let Some(date) = date {
        violations.extend(DonorValidator::check_donation_date(Some(date), now));
        if donor.update_last_donation_date(date, now) == Err(DonationDateError::Inactive) {
            output.warning("Last donation date is ignored for inactive donors")?;
        }
    }
    debug!(violations = violations.len(), "Donor checked");

    if output.format() == OutputFormat::Json {
        output.data(&render::json(&report(&donor, &violations, now))?)?;
    } else if violations.is_empty() {
        output.success("Donor details are valid")?;
        output.print(&format!(
            "Eligible to donate today: {}",
            if donor.is_eligible(now) { "yes" } else { "no" }
        ))?;
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::InvalidDonor { violations })
    }
}

fn report(
    donor: &Donor,
    violations: &[ValidationError],
    now: chrono::DateTime<chrono::Utc>,
) -> Report {
    Report {
        valid: violations.is_empty(),
        eligible: violations.is_empty() && donor.is_eligible(now),
        violations: violations
            .iter()
            .map(|v| Violation {
                field: v.field(),
                message: v.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use donatelife_adapters::FixedClock;

    use crate::{cli::GlobalArgs, config::AppConfig};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 9, 0, 0).unwrap()
    }

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    fn ana() -> DonorFields {
        DonorFields {
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            blood_type: "ab+".into(),
            phone: "1234567890".into(),
            city: "Porto".into(),
            ..DonorFields::default()
        }
    }

    #[test]
    fn valid_details_pass() {
        let clock = FixedClock::new(now());
        assert!(check(ana(), &clock, &quiet_output()).is_ok());
    }

    #[test]
    fn future_date_is_a_violation() {
        let clock = FixedClock::new(now());
        let fields = DonorFields {
            last_donation: Some("2026-09-02".into()),
            email: Some("ana-at-example".into()),
            ..ana()
        };
        let err = check(fields, &clock, &quiet_output()).unwrap_err();
        assert_eq!(
            err.violations(),
            [ValidationError::InvalidEmail, ValidationError::FutureDonationDate]
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn report_lists_fields() {
        let donor = Donor::new(Uuid::nil(), "", "Silva", "O+", None, "1234567890", "Porto");
        let r = report(&donor, &[ValidationError::MissingFirstName], now());
        assert!(!r.valid);
        assert!(!r.eligible);
        assert_eq!(r.violations[0].field, "first_name");
        assert_eq!(r.violations[0].message, "First name is required");
    }
}
