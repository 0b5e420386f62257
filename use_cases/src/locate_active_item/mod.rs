use entities::trip::{ActiveView, ItineraryItem, TripDay};

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug)]
pub struct Located<'a> {
    pub item: Option<&'a ItineraryItem>,
    pub confidence: Confidence,
}

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub fn haversine_meters(a: (f64, f64), b: (f64, f64)) -> f64 {
    let lat1 = a.0.to_radians();
    let lat2 = b.0.to_radians();
    let d_lat = (b.0 - a.0).to_radians();
    let d_lng = (b.1 - a.1).to_radians();

    let x = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let y = 2.0 * x.sqrt().atan2((1.0 - x).sqrt());
    EARTH_RADIUS_METERS * y
}

fn time_score(item: &ItineraryItem, minute_of_day: u32) -> i64 {
    let start = i64::from(item.start_time.minute_of_day());
    let minute = i64::from(minute_of_day);

    match item.end_time.map(|end| i64::from(end.minute_of_day())) {
        Some(end) if minute >= start && minute <= end => 60,
        None if minute >= start => 45,
        _ => {
            let delta = (minute - start).abs();
            (45 - delta / 8).max(0)
        }
    }
}

fn distance_score(item: &ItineraryItem, coords: Option<(f64, f64)>) -> i64 {
    let Some(coords) = coords else {
        return 20;
    };
    let (Some(lat), Some(lng)) = (item.lat, item.lng) else {
        return 15;
    };

    let meters = haversine_meters(coords, (lat, lng));
    if meters < 400.0 {
        40
    } else if meters < 1_200.0 {
        30
    } else if meters < 3_000.0 {
        20
    } else if meters < 6_000.0 {
        12
    } else {
        5
    }
}

/// Scores the day's visible items by closeness in time and space and picks
/// the best guess at what the traveller is doing right now.
pub fn locate_active_item(
    day: &TripDay,
    coords: Option<(f64, f64)>,
    minute_of_day: u32,
) -> Located<'_> {
    let items = if !day.detail_items.is_empty() && day.active_view == ActiveView::Detail {
        &day.detail_items
    } else {
        &day.summary_items
    };

    let mut winner: Option<&ItineraryItem> = None;
    let mut winner_score = -1;

    for item in items {
        let score = time_score(item, minute_of_day) + distance_score(item, coords);
        if score > winner_score {
            winner_score = score;
            winner = Some(item);
        }
    }

    let confidence = match winner_score {
        score if score >= 80 => Confidence::High,
        score if score >= 55 => Confidence::Medium,
        _ => Confidence::Low,
    };

    Located {
        item: winner,
        confidence,
    }
}
