//! Launches and everything a launch references directly: payloads and pads.

use super::shapes::{
    document, nullable_boolean, nullable_integer, nullable_number, nullable_object_id,
    nullable_string, nullable_url, object_ids, site_fields, strings, urls,
};
use super::vehicles::dragon_manifest;
use contract_harness::Shape;

pub const DATE_PRECISIONS: [&str; 6] = ["half", "quarter", "year", "month", "day", "hour"];

fn launch_core() -> Shape {
    Shape::object([
        ("core", nullable_object_id()),
        ("flight", nullable_integer()),
        ("gridfins", nullable_boolean()),
        ("legs", nullable_boolean()),
        ("reused", nullable_boolean()),
        ("landing_attempt", nullable_boolean()),
        ("landing_success", nullable_boolean()),
        ("landing_type", nullable_string()),
        ("landpad", nullable_object_id()),
    ])
}

fn launch_links() -> Shape {
    Shape::object([
        (
            "patch",
            Shape::object([("small", nullable_url()), ("large", nullable_url())]),
        ),
        (
            "reddit",
            Shape::object([
                ("campaign", nullable_url()),
                ("launch", nullable_url()),
                ("media", nullable_url()),
                ("recovery", nullable_url()),
            ]),
        ),
        (
            "flickr",
            Shape::object([("small", urls()), ("original", urls())]),
        ),
        ("presskit", nullable_url()),
        ("webcast", nullable_url()),
        ("youtube_id", nullable_string()),
        ("article", nullable_url()),
        ("wikipedia", nullable_url()),
    ])
}

pub fn launch() -> Shape {
    document([
        ("flight_number", Shape::integer()),
        ("name", Shape::string()),
        ("date_utc", Shape::date_time()),
        ("date_unix", Shape::integer()),
        ("date_local", Shape::date_time()),
        ("date_precision", Shape::one_of(DATE_PRECISIONS)),
        ("static_fire_date_utc", Shape::date_time().nullable()),
        ("static_fire_date_unix", nullable_integer()),
        ("net", Shape::boolean()),
        ("window", nullable_integer()),
        ("rocket", nullable_object_id()),
        ("success", nullable_boolean()),
        (
            "failures",
            Shape::array(Shape::object([
                ("time", nullable_integer()),
                ("altitude", nullable_integer()),
                ("reason", Shape::string()),
            ])),
        ),
        ("upcoming", Shape::boolean()),
        ("details", nullable_string()),
        (
            "fairings",
            Shape::object([
                ("reused", nullable_boolean()),
                ("recovery_attempt", nullable_boolean()),
                ("recovered", nullable_boolean()),
                ("ships", object_ids()),
            ])
            .nullable(),
        ),
        // Either crew ids or `{ crew, role }` objects depending on the launch.
        ("crew", Shape::array(Shape::any())),
        ("ships", object_ids()),
        ("capsules", object_ids()),
        ("payloads", object_ids()),
        ("launchpad", nullable_object_id()),
        ("cores", Shape::array(launch_core())),
        ("links", launch_links()),
        ("auto_update", Shape::boolean()),
        ("tbd", Shape::boolean()),
        ("launch_library_id", nullable_string()),
    ])
}

pub fn payload() -> Shape {
    document([
        ("name", Shape::string()),
        ("type", Shape::string()),
        ("reused", Shape::boolean()),
        ("launch", nullable_object_id()),
        ("customers", strings()),
        ("norad_ids", Shape::array(Shape::integer())),
        ("nationalities", strings()),
        ("manufacturers", strings()),
        ("mass_kg", nullable_number()),
        ("mass_lbs", nullable_number()),
        ("orbit", nullable_string()),
        ("reference_system", nullable_string()),
        ("regime", nullable_string()),
        ("longitude", nullable_number()),
        ("semi_major_axis_km", nullable_number()),
        ("eccentricity", nullable_number()),
        ("periapsis_km", nullable_number()),
        ("apoapsis_km", nullable_number()),
        ("inclination_deg", nullable_number()),
        ("period_min", nullable_number()),
        ("lifespan_years", nullable_number()),
        ("epoch", Shape::date_time().nullable()),
        ("mean_motion", nullable_number()),
        ("raan", nullable_number()),
        ("arg_of_pericenter", nullable_number()),
        ("mean_anomaly", nullable_number()),
        ("dragon", dragon_manifest()),
    ])
}

const PAD_STATUSES: [&str; 6] = [
    "active",
    "inactive",
    "unknown",
    "retired",
    "lost",
    "under construction",
];

pub fn launchpad() -> Shape {
    document(site_fields()).extend([
        ("status", Shape::one_of(PAD_STATUSES)),
        ("timezone", Shape::string()),
        ("launch_attempts", Shape::integer()),
        ("launch_successes", Shape::integer()),
        ("rockets", object_ids()),
    ])
}

pub fn landpad() -> Shape {
    document(site_fields()).extend([
        ("status", Shape::one_of(PAD_STATUSES)),
        ("type", Shape::string()),
        ("landing_attempts", Shape::integer()),
        ("landing_successes", Shape::integer()),
    ])
}
