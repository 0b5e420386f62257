use std::collections::BTreeMap;

use entities::trip::{ActiveView, TripDay, TripPatch, TripPlan};

/// Applies a patch to a plan, producing the next plan. Pure: neither input is
/// mutated, every touched day is cloned. Total: a date missing from the plan
/// is inserted, an existing one is merged, so no patch can fail to apply.
#[tracing::instrument(skip_all)]
pub fn apply_trip_patch(plan: &TripPlan, patch: &TripPatch) -> TripPlan {
    let mut by_date: BTreeMap<_, _> = plan
        .days
        .iter()
        .map(|day| (day.date.clone(), day.clone()))
        .collect();

    for incoming in patch.days_updated.iter().chain(patch.days_added.iter()) {
        match by_date.get_mut(&incoming.date) {
            Some(existing) => {
                let merged = merge_day(existing, incoming);
                *existing = merged;
            }
            None => {
                by_date.insert(incoming.date.clone(), incoming.clone());
            }
        }
    }

    TripPlan {
        // BTreeMap iteration order keeps days ascending by ISO date key.
        days: by_date.into_values().collect(),
        ..plan.clone()
    }
}

/// Field-wise precedence: summary items are curated and never overwritten
/// once populated; detail items are the freshest signal and a non-empty
/// incoming set replaces the existing one, forcing the detail view.
fn merge_day(existing: &TripDay, incoming: &TripDay) -> TripDay {
    let region = if incoming.region.is_empty() {
        existing.region.clone()
    } else {
        incoming.region.clone()
    };
    let summary_items = if existing.summary_items.is_empty() {
        incoming.summary_items.clone()
    } else {
        existing.summary_items.clone()
    };
    let (detail_items, active_view) = if incoming.detail_items.is_empty() {
        (existing.detail_items.clone(), existing.active_view)
    } else {
        (incoming.detail_items.clone(), ActiveView::Detail)
    };

    TripDay {
        date: existing.date.clone(),
        region,
        summary_items,
        detail_items,
        active_view,
    }
}

#[cfg(test)]
mod tests {
    use entities::trip::{
        ActiveView, Category, ItemId, ItineraryItem, ParseConfidence, TripDate, TripDay,
        TripPatch, TripPlan,
    };
    use shared_kernel::date_time::clock::ClockTime;

    use super::apply_trip_patch;

    fn item(id: &str, title: &str, start: &str) -> ItineraryItem {
        ItineraryItem {
            id: ItemId::from(id),
            title: title.to_owned(),
            start_time: ClockTime::parse(start).unwrap(),
            end_time: None,
            location: "Salalah".to_owned(),
            notes: title.to_owned(),
            category: Category::Sights,
            lat: None,
            lng: None,
        }
    }

    fn day(date: &str, region: &str, summary: Vec<ItineraryItem>, detail: Vec<ItineraryItem>) -> TripDay {
        let active_view = if detail.is_empty() {
            ActiveView::Summary
        } else {
            ActiveView::Detail
        };
        TripDay {
            date: TripDate::from(date),
            region: region.to_owned(),
            summary_items: summary,
            detail_items: detail,
            active_view,
        }
    }

    fn seed_plan() -> TripPlan {
        TripPlan {
            trip_name: "Oman & Dubai".to_owned(),
            start_date: TripDate::from("2026-02-07"),
            end_date: TripDate::from("2026-02-16"),
            timezone: "Asia/Muscat".to_owned(),
            days: vec![
                day(
                    "2026-02-12",
                    "Salalah",
                    vec![item("2026-02-12-summary-1", "Beach morning", "09:00")],
                    vec![],
                ),
                day(
                    "2026-02-14",
                    "Muscat",
                    vec![item("2026-02-14-summary-1", "Old town", "10:00")],
                    vec![item("2026-02-14-detail-1", "Mutrah souq", "10:00")],
                ),
            ],
            sources: vec![],
        }
    }

    fn patch(updated: Vec<TripDay>, added: Vec<TripDay>) -> TripPatch {
        TripPatch {
            days_added: added,
            days_updated: updated,
            conflicts: vec![],
            parse_confidence: ParseConfidence::new(0.9),
        }
    }

    #[test]
    fn test_detail_overrides_while_summary_is_preserved() {
        let incoming = day(
            "2026-02-12",
            "Oman - Salalah",
            vec![],
            vec![item("detail-1", "Detailed Salalah day", "08:30")],
        );
        let next = apply_trip_patch(&seed_plan(), &patch(vec![incoming], vec![]));

        let merged = next
            .days
            .iter()
            .find(|day| day.date == *"2026-02-12")
            .unwrap();
        assert_eq!(merged.region, "Oman - Salalah");
        assert_eq!(merged.summary_items[0].title, "Beach morning");
        assert_eq!(merged.detail_items[0].title, "Detailed Salalah day");
        assert_eq!(merged.active_view, ActiveView::Detail);
    }

    #[test]
    fn test_empty_incoming_fields_keep_existing_values() {
        let incoming = day("2026-02-14", "", vec![], vec![]);
        let next = apply_trip_patch(&seed_plan(), &patch(vec![incoming], vec![]));

        let merged = next
            .days
            .iter()
            .find(|day| day.date == *"2026-02-14")
            .unwrap();
        assert_eq!(merged.region, "Muscat");
        assert_eq!(merged.summary_items[0].title, "Old town");
        assert_eq!(merged.detail_items[0].title, "Mutrah souq");
        assert_eq!(merged.active_view, ActiveView::Detail);
    }

    #[test]
    fn test_unknown_dates_are_inserted_and_days_stay_sorted() {
        let added = day(
            "2026-02-08",
            "Dubai",
            vec![],
            vec![item("2026-02-08-detail-1", "Creek walk", "09:00")],
        );
        let next = apply_trip_patch(&seed_plan(), &patch(vec![], vec![added]));

        let dates = next
            .days
            .iter()
            .map(|day| day.date.inner())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2026-02-08", "2026-02-12", "2026-02-14"]);
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_merge_is_idempotent_for_detail_bearing_patches() {
        let incoming = day(
            "2026-02-12",
            "Oman - Salalah",
            vec![],
            vec![item("detail-1", "Detailed Salalah day", "08:30")],
        );
        let patch = patch(vec![incoming], vec![]);

        let once = apply_trip_patch(&seed_plan(), &patch);
        let twice = apply_trip_patch(&once, &patch);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inputs_are_not_mutated_and_plan_fields_pass_through() {
        let plan = seed_plan();
        let incoming = day(
            "2026-02-12",
            "Oman - Salalah",
            vec![],
            vec![item("detail-1", "Detailed Salalah day", "08:30")],
        );
        let patch = patch(vec![incoming], vec![]);

        let next = apply_trip_patch(&plan, &patch);
        assert_eq!(plan, seed_plan());
        assert_eq!(next.trip_name, plan.trip_name);
        assert_eq!(next.start_date, plan.start_date);
        assert_eq!(next.end_date, plan.end_date);
        assert_eq!(next.timezone, plan.timezone);
        // The untouched day is carried over intact.
        let untouched = next
            .days
            .iter()
            .find(|day| day.date == *"2026-02-14")
            .unwrap();
        assert_eq!(untouched, &plan.days[1]);
    }
}
