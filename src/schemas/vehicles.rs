//! Rockets, Dragon spacecraft, flown hardware and the recovery fleet.

use super::shapes::{
    document, isp, length, mass, nullable_boolean, nullable_integer, nullable_number,
    nullable_object_id, nullable_string, nullable_url, object_ids, strings, thrust, urls, volume,
};
use contract_harness::Shape;

fn stage() -> Shape {
    Shape::object([
        ("reusable", Shape::boolean()),
        ("engines", Shape::integer()),
        ("fuel_amount_tons", nullable_number()),
        ("burn_time_sec", nullable_number()),
    ])
}

pub fn rocket() -> Shape {
    document([
        ("name", Shape::string()),
        ("type", Shape::string()),
        ("active", Shape::boolean()),
        ("stages", Shape::integer()),
        ("boosters", Shape::integer()),
        ("cost_per_launch", Shape::integer()),
        ("success_rate_pct", Shape::number()),
        ("first_flight", Shape::date_time()),
        ("country", Shape::string()),
        ("company", Shape::string()),
        ("height", length()),
        ("diameter", length()),
        ("mass", mass()),
        (
            "first_stage",
            stage().extend([("thrust_sea_level", thrust()), ("thrust_vacuum", thrust())]),
        ),
        (
            "second_stage",
            stage().extend([
                ("thrust", thrust()),
                (
                    "payloads",
                    Shape::object([
                        (
                            "composite_fairing",
                            Shape::object([("height", length()), ("diameter", length())]),
                        ),
                        ("option_1", Shape::string()),
                    ]),
                ),
            ]),
        ),
        (
            "engines",
            Shape::object([
                ("isp", isp()),
                ("thrust_sea_level", thrust()),
                ("thrust_vacuum", thrust()),
                ("number", Shape::integer()),
                ("type", Shape::string()),
                ("version", Shape::string()),
                ("layout", nullable_string()),
                ("engine_loss_max", nullable_integer()),
                ("propellant_1", Shape::string()),
                ("propellant_2", Shape::string()),
                ("thrust_to_weight", Shape::number()),
            ]),
        ),
        (
            "landing_legs",
            Shape::object([("number", Shape::integer()), ("material", nullable_string())]),
        ),
        (
            "payload_weights",
            Shape::array(Shape::object([
                ("id", Shape::string()),
                ("name", Shape::string()),
                ("kg", Shape::number()),
                ("lb", Shape::number()),
            ])),
        ),
        ("flickr_images", urls()),
        ("wikipedia", Shape::url()),
        ("description", Shape::string()),
    ])
}

pub fn dragon() -> Shape {
    document([
        ("name", Shape::string()),
        ("type", Shape::string()),
        ("active", Shape::boolean()),
        ("crew_capacity", Shape::integer()),
        ("sidewall_angle_deg", Shape::number()),
        ("orbit_duration_yr", Shape::number()),
        ("dry_mass_kg", Shape::number()),
        ("dry_mass_lb", Shape::number()),
        ("first_flight", Shape::date_time().nullable()),
        (
            "heat_shield",
            Shape::object([
                ("material", Shape::string()),
                ("size_meters", Shape::number()),
                ("temp_degrees", nullable_number()),
                ("dev_partner", nullable_string()),
            ]),
        ),
        ("thrusters", Shape::array(Shape::any())),
        ("launch_payload_mass", mass()),
        ("launch_payload_vol", volume()),
        ("return_payload_mass", mass()),
        ("return_payload_vol", volume()),
        (
            "pressurized_capsule",
            Shape::object([("payload_volume", volume())]),
        ),
        (
            "trunk",
            Shape::object([
                ("trunk_volume", volume()),
                (
                    "cargo",
                    Shape::object([
                        ("solar_array", nullable_integer()),
                        ("unpressurized_cargo", nullable_boolean()),
                    ]),
                ),
            ]),
        ),
        ("height_w_trunk", length()),
        ("diameter", length()),
        ("flickr_images", urls()),
        ("wikipedia", Shape::url()),
        ("description", Shape::string()),
    ])
}

pub fn capsule() -> Shape {
    document([
        ("serial", Shape::string()),
        (
            "status",
            Shape::one_of(["unknown", "active", "retired", "destroyed"]),
        ),
        ("type", Shape::one_of(["Dragon 1.0", "Dragon 1.1", "Dragon 2.0"])),
        ("reuse_count", Shape::integer()),
        ("water_landings", Shape::integer()),
        ("land_landings", Shape::integer()),
        ("last_update", nullable_string()),
        ("launches", object_ids()),
    ])
}

pub fn core() -> Shape {
    document([
        ("serial", Shape::string()),
        ("block", nullable_integer()),
        (
            "status",
            Shape::one_of(["active", "inactive", "unknown", "expended", "lost", "retired"]),
        ),
        ("reuse_count", Shape::integer()),
        ("rtls_attempts", Shape::integer()),
        ("rtls_landings", Shape::integer()),
        ("asds_attempts", Shape::integer()),
        ("asds_landings", Shape::integer()),
        ("last_update", nullable_string()),
        ("launches", object_ids()),
    ])
}

pub fn ship() -> Shape {
    document([
        ("name", Shape::string()),
        ("active", Shape::boolean()),
        ("legacy_id", nullable_string()),
        ("model", nullable_string()),
        ("type", nullable_string()),
        ("roles", strings()),
        ("imo", nullable_integer()),
        ("mmsi", nullable_integer()),
        ("abs", nullable_integer()),
        ("class", nullable_integer()),
        ("mass_kg", nullable_number()),
        ("mass_lbs", nullable_number()),
        ("year_built", nullable_integer()),
        ("home_port", nullable_string()),
        ("status", nullable_string()),
        ("speed_kn", nullable_number()),
        ("course_deg", nullable_number()),
        ("latitude", nullable_number()),
        ("longitude", nullable_number()),
        ("last_ais_update", nullable_string()),
        ("link", nullable_url()),
        ("image", nullable_url()),
        ("launches", object_ids()),
    ])
}

pub fn roadster() -> Shape {
    document([
        ("name", Shape::string()),
        ("launch_date_utc", Shape::date_time()),
        ("launch_date_unix", Shape::integer()),
        ("launch_mass_kg", Shape::number()),
        ("launch_mass_lbs", Shape::number()),
        ("norad_id", Shape::integer()),
        ("epoch_jd", Shape::number()),
        ("orbit_type", Shape::string()),
        ("apoapsis_au", Shape::number()),
        ("periapsis_au", Shape::number()),
        ("semi_major_axis_au", Shape::number()),
        ("eccentricity", Shape::number()),
        ("inclination", Shape::number()),
        ("longitude", Shape::number()),
        ("periapsis_arg", Shape::number()),
        ("period_days", Shape::number()),
        ("speed_kph", Shape::number()),
        ("speed_mph", Shape::number()),
        ("earth_distance_km", Shape::number()),
        ("earth_distance_mi", Shape::number()),
        ("mars_distance_km", Shape::number()),
        ("mars_distance_mi", Shape::number()),
        ("flickr_images", urls()),
        ("wikipedia", Shape::url()),
        ("video", Shape::url()),
        ("details", Shape::string()),
    ])
}

/// The Dragon part of a payload, present for every payload and all-null for
/// non-Dragon ones.
pub fn dragon_manifest() -> Shape {
    Shape::object([
        ("capsule", nullable_object_id()),
        ("mass_returned_kg", nullable_number()),
        ("mass_returned_lbs", nullable_number()),
        ("flight_time_sec", nullable_number()),
        ("manifest", nullable_url()),
        ("water_landing", nullable_boolean()),
        ("land_landing", nullable_boolean()),
    ])
}
