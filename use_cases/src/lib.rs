pub mod apply_trip_patch;
pub mod extract_itinerary;
pub mod locate_active_item;
