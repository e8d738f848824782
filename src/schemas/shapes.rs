//! Building blocks shared by several resource schemas.

use contract_harness::Shape;

pub fn nullable_number() -> Shape {
    Shape::number().nullable()
}

pub fn nullable_integer() -> Shape {
    Shape::integer().nullable()
}

pub fn nullable_string() -> Shape {
    Shape::string().nullable()
}

pub fn nullable_boolean() -> Shape {
    Shape::boolean().nullable()
}

pub fn nullable_url() -> Shape {
    Shape::url().nullable()
}

pub fn nullable_object_id() -> Shape {
    Shape::object_id().nullable()
}

/// References to other documents.
pub fn object_ids() -> Shape {
    Shape::array(Shape::object_id())
}

pub fn strings() -> Shape {
    Shape::array(Shape::string())
}

pub fn urls() -> Shape {
    Shape::array(Shape::url())
}

/// `{ meters, feet }`
pub fn length() -> Shape {
    Shape::object([("meters", nullable_number()), ("feet", nullable_number())])
}

/// `{ kg, lb }`
pub fn mass() -> Shape {
    Shape::object([("kg", nullable_number()), ("lb", nullable_number())])
}

/// `{ kN, lbf }`
pub fn thrust() -> Shape {
    Shape::object([("kN", nullable_number()), ("lbf", nullable_number())])
}

/// `{ cubic_meters, cubic_feet }`
pub fn volume() -> Shape {
    Shape::object([
        ("cubic_meters", nullable_number()),
        ("cubic_feet", nullable_number()),
    ])
}

/// Specific impulse in seconds.
pub fn isp() -> Shape {
    Shape::object([("sea_level", nullable_number()), ("vacuum", nullable_number())])
}

/// `{ large: [url] }` image sets used by pads.
pub fn images() -> Shape {
    Shape::object([("large", urls())])
}

/// Fields every document carries.
pub fn document<I, K>(fields: I) -> Shape
where
    I: IntoIterator<Item = (K, Shape)>,
    K: Into<String>,
{
    Shape::object([("id", Shape::object_id())]).extend(fields)
}

/// Fields shared by launch and landing pads.
pub fn site_fields() -> Vec<(&'static str, Shape)> {
    vec![
        ("name", nullable_string()),
        ("full_name", nullable_string()),
        ("locality", nullable_string()),
        ("region", nullable_string()),
        ("latitude", nullable_number()),
        ("longitude", nullable_number()),
        ("wikipedia", nullable_url().optional()),
        ("details", nullable_string()),
        ("images", images()),
        ("launches", object_ids()),
    ]
}
