use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ═══════════════════════════════════════════════════════════════════════════
// PERSON
// ═══════════════════════════════════════════════════════════════════════════

/// Hair colors accepted on a person record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Brown,
    Black,
    Blonde,
    Red,
}

impl HairColor {
    pub const ALL: [HairColor; 5] = [
        HairColor::White,
        HairColor::Brown,
        HairColor::Black,
        HairColor::Blonde,
        HairColor::Red,
    ];
}

impl std::fmt::Display for HairColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HairColor::White => write!(f, "white"),
            HairColor::Brown => write!(f, "brown"),
            HairColor::Black => write!(f, "black"),
            HairColor::Blonde => write!(f, "blonde"),
            HairColor::Red => write!(f, "red"),
        }
    }
}

/// A person as submitted by a client, password included
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    #[serde(default)]
    pub hair_color: Option<HairColor>,
    #[serde(default)]
    pub is_married: Option<bool>,
    pub email: String,
    #[serde(default)]
    pub web: Option<String>,
    pub password: String,
}

/// Public view of a [`Person`]. The password has no field here, so it can
/// never reach a response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonOut {
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub hair_color: Option<HairColor>,
    pub is_married: Option<bool>,
    pub email: String,
    pub web: Option<String>,
}

impl From<Person> for PersonOut {
    fn from(person: Person) -> Self {
        Self {
            first_name: person.first_name,
            last_name: person.last_name,
            age: person.age,
            hair_color: person.hair_color,
            is_married: person.is_married,
            email: person.email,
            web: person.web,
        }
    }
}

/// Where a person lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Body of `PUT /person/{person_id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePersonRequest {
    pub person: Person,
    pub location: Location,
}

/// Flatten a person's public view and a location into one JSON object.
///
/// The two shapes share no field names, so every key from both sides
/// survives the merge.
pub fn merge_person_location(
    person: &PersonOut,
    location: &Location,
) -> serde_json::Result<Map<String, Value>> {
    let mut merged = match serde_json::to_value(person)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(location) = serde_json::to_value(location)? {
        merged.extend(location);
    }
    Ok(merged)
}

// ═══════════════════════════════════════════════════════════════════════════
// LOOKUPS
// ═══════════════════════════════════════════════════════════════════════════

/// Query string of `GET /person/detail`. Echoed back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonQuery {
    pub name: Option<String>,
    pub age: Option<i64>,
}

/// Path segment carrying a person id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PersonIdPath {
    pub person_id: i64,
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response: the username only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginOut {
    pub username: String,
}

impl From<LoginForm> for LoginOut {
    fn from(form: LoginForm) -> Self {
        Self {
            username: form.username,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// Payload of `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    #[serde(rename = "Hello")]
    pub hello: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self {
            hello: "World".to_string(),
        }
    }
}
