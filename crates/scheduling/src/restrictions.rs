// Copyright (C) 2026 Shipdesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service restriction assembly.
//!
//! Restrictions are advisory: they describe conditions the caller should
//! surface, but enforcement (blackout forcing, capacity tiers) happens
//! in slot generation.

use chrono::Datelike;
use chrono::NaiveDate;
use shipdesk_domain::{
    AvailableDate, Coverage, RestrictionType, ServiceArea, ServiceRestriction, Severity,
    maintenance_factor,
};

/// Deterministic threshold below which a date is in an equipment
/// maintenance window.
const MAINTENANCE_THRESHOLD: f64 = 0.05;

/// Winter months that trigger the seasonal advisory for remote zones.
const WINTER_MONTHS: [u32; 3] = [12, 1, 2];

/// Collects advisory restrictions for an availability window.
#[must_use]
pub fn collect_restrictions(
    area: &ServiceArea,
    zip: &str,
    dates: &[AvailableDate],
) -> Vec<ServiceRestriction> {
    let mut restrictions: Vec<ServiceRestriction> = Vec::new();

    match area.coverage {
        Coverage::Remote => restrictions.push(ServiceRestriction {
            restriction_type: RestrictionType::Geographic,
            message: format!(
                "{} is a remote service area: pickup capacity is reduced and transit times are extended",
                area.zone
            ),
            affected_dates: None,
            severity: Severity::Warning,
        }),
        Coverage::Limited => restrictions.push(ServiceRestriction {
            restriction_type: RestrictionType::Geographic,
            message: format!(
                "{} has limited coverage: some pickup windows carry reduced capacity",
                area.zone
            ),
            affected_dates: None,
            severity: Severity::Info,
        }),
        Coverage::Full => {}
    }

    if area.coverage == Coverage::Remote {
        let winter_dates: Vec<NaiveDate> = dates
            .iter()
            .map(|day| day.date)
            .filter(|date| WINTER_MONTHS.contains(&date.month()))
            .collect();
        if !winter_dates.is_empty() {
            restrictions.push(ServiceRestriction {
                restriction_type: RestrictionType::Seasonal,
                message: String::from(
                    "Winter weather may delay or cancel pickups in remote areas",
                ),
                affected_dates: Some(winter_dates),
                severity: Severity::Warning,
            });
        }
    }

    let maintenance_dates: Vec<NaiveDate> = dates
        .iter()
        .map(|day| day.date)
        .filter(|date| maintenance_factor(zip, *date) < MAINTENANCE_THRESHOLD)
        .collect();
    if !maintenance_dates.is_empty() {
        restrictions.push(ServiceRestriction {
            restriction_type: RestrictionType::Equipment,
            message: String::from(
                "Lift-gate equipment is under scheduled maintenance on some dates",
            ),
            affected_dates: Some(maintenance_dates),
            severity: Severity::Info,
        });
    }

    restrictions
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shipdesk_domain::determine_service_area;

    fn day(year: i32, month: u32, d: u32) -> AvailableDate {
        AvailableDate {
            date: NaiveDate::from_ymd_opt(year, month, d).unwrap(),
            day_of_week: String::new(),
            is_business_day: true,
            time_slots: Vec::new(),
            notes: None,
            restrictions: None,
        }
    }

    #[test]
    fn test_full_coverage_has_no_geographic_restriction() {
        let area: ServiceArea = determine_service_area("10001").unwrap();
        let restrictions: Vec<ServiceRestriction> =
            collect_restrictions(&area, "10001", &[day(2026, 3, 10)]);
        assert!(
            restrictions
                .iter()
                .all(|r| r.restriction_type != RestrictionType::Geographic)
        );
    }

    #[test]
    fn test_limited_coverage_emits_info() {
        let area: ServiceArea = determine_service_area("30301").unwrap();
        let restrictions: Vec<ServiceRestriction> =
            collect_restrictions(&area, "30301", &[day(2026, 3, 10)]);
        let geographic: &ServiceRestriction = restrictions
            .iter()
            .find(|r| r.restriction_type == RestrictionType::Geographic)
            .unwrap();
        assert_eq!(geographic.severity, Severity::Info);
    }

    #[test]
    fn test_remote_coverage_emits_warning() {
        let area: ServiceArea = determine_service_area("99501").unwrap();
        let restrictions: Vec<ServiceRestriction> =
            collect_restrictions(&area, "99501", &[day(2026, 6, 10)]);
        let geographic: &ServiceRestriction = restrictions
            .iter()
            .find(|r| r.restriction_type == RestrictionType::Geographic)
            .unwrap();
        assert_eq!(geographic.severity, Severity::Warning);
    }

    #[test]
    fn test_seasonal_warning_for_remote_winter_window() {
        let area: ServiceArea = determine_service_area("99501").unwrap();
        let dates: Vec<AvailableDate> = vec![day(2026, 12, 14), day(2026, 12, 15)];
        let restrictions: Vec<ServiceRestriction> =
            collect_restrictions(&area, "99501", &dates);
        let seasonal: &ServiceRestriction = restrictions
            .iter()
            .find(|r| r.restriction_type == RestrictionType::Seasonal)
            .unwrap();
        assert_eq!(seasonal.severity, Severity::Warning);
        assert_eq!(seasonal.affected_dates.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_no_seasonal_warning_in_summer() {
        let area: ServiceArea = determine_service_area("99501").unwrap();
        let restrictions: Vec<ServiceRestriction> =
            collect_restrictions(&area, "99501", &[day(2026, 7, 14)]);
        assert!(
            restrictions
                .iter()
                .all(|r| r.restriction_type != RestrictionType::Seasonal)
        );
    }

    #[test]
    fn test_no_seasonal_warning_for_full_coverage_in_winter() {
        let area: ServiceArea = determine_service_area("10001").unwrap();
        let restrictions: Vec<ServiceRestriction> =
            collect_restrictions(&area, "10001", &[day(2026, 12, 14)]);
        assert!(
            restrictions
                .iter()
                .all(|r| r.restriction_type != RestrictionType::Seasonal)
        );
    }

    #[test]
    fn test_equipment_restriction_is_deterministic() {
        let area: ServiceArea = determine_service_area("10001").unwrap();
        let dates: Vec<AvailableDate> = (1..=28).map(|d| day(2026, 3, d)).collect();
        let first: Vec<ServiceRestriction> = collect_restrictions(&area, "10001", &dates);
        let second: Vec<ServiceRestriction> = collect_restrictions(&area, "10001", &dates);
        assert_eq!(first, second);
    }
}
