//! The company, its people, its history and the Starlink constellation.

use super::shapes::{
    document, nullable_number, nullable_object_id, nullable_string, nullable_url, object_ids,
};
use contract_harness::Shape;

pub fn company() -> Shape {
    document([
        ("name", Shape::string()),
        ("founder", Shape::string()),
        ("founded", Shape::integer()),
        ("employees", Shape::integer()),
        ("vehicles", Shape::integer()),
        ("launch_sites", Shape::integer()),
        ("test_sites", Shape::integer()),
        ("ceo", Shape::string()),
        ("cto", Shape::string()),
        ("coo", Shape::string()),
        ("cto_propulsion", Shape::string()),
        ("valuation", Shape::number()),
        ("summary", Shape::string()),
        (
            "headquarters",
            Shape::object([
                ("address", Shape::string()),
                ("city", Shape::string()),
                ("state", Shape::string()),
            ]),
        ),
        (
            "links",
            Shape::object([
                ("website", Shape::url()),
                ("flickr", Shape::url()),
                ("twitter", Shape::url()),
                ("elon_twitter", Shape::url()),
            ]),
        ),
    ])
}

pub fn crew_member() -> Shape {
    document([
        ("name", Shape::string()),
        ("agency", Shape::string()),
        ("image", nullable_url()),
        ("wikipedia", nullable_url()),
        ("launches", object_ids()),
        (
            "status",
            Shape::one_of(["active", "inactive", "retired", "unknown"]),
        ),
    ])
}

pub fn history_event() -> Shape {
    document([
        ("title", Shape::string()),
        ("event_date_utc", Shape::date_time()),
        ("event_date_unix", Shape::integer()),
        ("details", nullable_string()),
        ("links", Shape::object([("article", nullable_url())])),
    ])
}

pub fn starlink_satellite() -> Shape {
    document([
        // Raw Space-Track element set; its layout is not ours to pin down.
        ("spaceTrack", Shape::any()),
        ("launch", nullable_object_id()),
        ("version", nullable_string()),
        ("height_km", nullable_number()),
        ("latitude", nullable_number()),
        ("longitude", nullable_number()),
        ("velocity_kms", nullable_number()),
    ])
}
