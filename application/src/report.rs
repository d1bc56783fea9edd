//! [`Report`] of a booking [`Flow`].

use std::fmt;

use booking::{
    domain::draft::{DateMode, PaymentMode},
    read::{display_price, summary},
    Flow,
};

/// Human-readable report of a booking [`Flow`], the way a customer sees it
/// before confirming.
#[derive(Clone, Copy, Debug)]
pub struct Report<'a>(pub &'a Flow);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(flow) = self;
        let draft = flow.draft();
        let price = flow.price();

        let service = draft.service().map_or("-", |s| s.name.as_str());
        match &price.badge {
            Some(badge) => {
                line(f, "Service:", format_args!("{service} ({badge})"))?;
            }
            None => line(f, "Service:", service)?,
        }
        let address = flow.address().map_or("-", |a| a.display_name());
        line(f, "Address:", address)?;

        for section in flow.progress().order() {
            let mark = if flow.progress().is_completed(*section) {
                '✓'
            } else {
                ' '
            };
            let title = format!("{mark} {}:", section.title());
            line(f, &title, flow.summary(*section))?;
        }
        if draft.date_mode() != DateMode::SingleDate {
            line(f, "Weekdays:", summary::weekdays(draft.weekdays()))?;
        }

        let add_ons = flow
            .add_ons()
            .iter()
            .filter(|a| draft.add_ons().contains(&a.id))
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>();
        if !add_ons.is_empty() {
            line(f, "Add-ons:", add_ons.join(", "))?;
        }

        line(f, "Booking:", summary::booking(draft))?;
        if price.is_premium() {
            line(
                f,
                "Base price:",
                format_args!(
                    "{} → {} ({}/hour)",
                    display_price(price.list_price),
                    display_price(price.base_price),
                    display_price(price.hourly_rate),
                ),
            )?;
        }
        line(
            f,
            "Total:",
            format_args!(
                "{} × {} visit(s) = {}",
                display_price(price.per_visit),
                price.visits,
                display_price(price.total),
            ),
        )?;
        match price.payment_mode {
            PaymentMode::PayNow => line(
                f,
                "Pay now:",
                format_args!(
                    "{} ({} discount, saving {})",
                    display_price(price.due()),
                    price.discount,
                    display_price(price.saving),
                ),
            )?,
            PaymentMode::PayLater => line(
                f,
                "Pay later:",
                format_args!(
                    "{} in cash on the visit",
                    display_price(price.due()),
                ),
            )?,
        }

        if let Some(field) = draft.validity().first_unmet() {
            writeln!(f, "Please select {}", field.label())
        } else if flow.can_confirm() {
            writeln!(f, "Ready to confirm")
        } else {
            Ok(())
        }
    }
}

/// Writes a single labeled line of a [`Report`].
fn line(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    writeln!(f, "{label:<20}{value}")
}

#[cfg(test)]
mod spec {
    use booking::{
        domain::{Clock, TimeSlot},
        infra::Fixture,
        Config, Flow, Service,
    };
    use common::DateTime;
    use time::{Date, Month, UtcOffset};

    use crate::config::Backend;

    use super::Report;

    #[tokio::test]
    async fn reports_complete_booking() {
        let now = DateTime::from_rfc3339("2026-11-01T04:00:00Z").unwrap();
        let config = Config {
            clock: Clock::frozen(now, UtcOffset::from_hms(4, 0, 0).unwrap()),
            ..Config::default()
        };
        let svc = Service::new(config, Fixture::from(Backend::default()));
        let mut flow = Flow::new(svc.config());
        flow.load(&svc, Some(2.into())).await;
        flow.select_size("studio".parse().unwrap());
        flow.select_date(
            Date::from_calendar_date(2026, Month::November, 3).unwrap(),
        );
        flow.select_time(TimeSlot::at(9, 0).unwrap());
        flow.toggle_add_on(1.into());

        let report = Report(&flow).to_string();

        assert!(report.contains("Deep Cleaning (2x rate)"), "{report}");
        assert!(report.contains("Home"), "{report}");
        assert!(report.contains("Studio • AED 300"), "{report}");
        assert!(report.contains("Nov 3 at 9:00 AM"), "{report}");
        assert!(report.contains("Inside Fridge"), "{report}");
        assert!(report.contains("AED 340 × 1 visit(s) = AED 340"), "{report}");
        assert!(
            report.contains("AED 323 (5% discount, saving AED 17)"),
            "{report}",
        );
        assert!(report.contains("Ready to confirm"), "{report}");
    }
}
