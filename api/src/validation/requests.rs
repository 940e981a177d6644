//! Validation implementations for API request types
//!
//! This module implements the `Validatable` trait for every record the
//! handlers accept from clients.

use shared::models::{
    ContactForm, HairColor, Location, LoginForm, Person, PersonIdPath, PersonQuery,
    UpdatePersonRequest,
};

use super::extractors::{FieldError, Validatable, ValidationBuilder};
use super::fields::FieldReader;
use super::sanitizers::{sanitize_email, sanitize_url_optional};
use super::validators::{
    validate_email, validate_gt, validate_gt_optional, validate_int_range, validate_length,
    validate_length_optional, validate_min_length, validate_required, validate_url_optional,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants for validation rules
// ─────────────────────────────────────────────────────────────────────────────

const MIN_NAME_LENGTH: usize = 1;
const MAX_NAME_LENGTH: usize = 50;
/// Exclusive lower bound for a person's age
const MIN_AGE_EXCLUSIVE: i64 = 0;
const MAX_AGE: i64 = 115;
const MIN_PASSWORD_LENGTH: usize = 8;

const MAX_CITY_LENGTH: usize = 50;
const MAX_STATE_LENGTH: usize = 50;
const MAX_COUNTRY_LENGTH: usize = 40;

const MIN_QUERY_NAME_LENGTH: usize = 10;
const MAX_QUERY_NAME_LENGTH: usize = 50;
/// Exclusive lower bound for the age query parameter
const MIN_QUERY_AGE_EXCLUSIVE: i64 = 1;

/// Exclusive lower bound for person ids
const MIN_PERSON_ID_EXCLUSIVE: i64 = 0;

const MAX_USERNAME_LENGTH: usize = 20;

const MAX_CONTACT_NAME_LENGTH: usize = 20;
const MIN_CONTACT_MESSAGE_LENGTH: usize = 20;

// ─────────────────────────────────────────────────────────────────────────────
// Person validation
// ─────────────────────────────────────────────────────────────────────────────

impl Validatable for Person {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Person {
            first_name: fields.required_string("first_name"),
            last_name: fields.required_string("last_name"),
            age: fields.required_int("age"),
            hair_color: fields.optional_enum("hair_color", &HairColor::ALL),
            is_married: fields.optional_bool("is_married"),
            email: fields.required_string("email"),
            web: fields.optional_string("web"),
            password: fields.required_string("password"),
        }
    }

    fn sanitize(&mut self) {
        self.email = sanitize_email(&self.email);
        sanitize_url_optional(&mut self.web);
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        builder.check("first_name", || {
            validate_length(&self.first_name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
        });
        builder.check("last_name", || {
            validate_length(&self.last_name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)
        });

        // age: 0 < age <= 115
        builder.check("age", || validate_int_range(self.age, MIN_AGE_EXCLUSIVE, MAX_AGE));

        // hair_color and is_married are checked while reading fields
        builder.check("email", || validate_email(&self.email));
        builder.check("web", || validate_url_optional(&self.web));
        builder.check("password", || {
            validate_min_length(&self.password, MIN_PASSWORD_LENGTH)
        });

        builder.build()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Location validation
// ─────────────────────────────────────────────────────────────────────────────

impl Validatable for Location {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        Location {
            city: fields.required_string("city"),
            state: fields.required_string("state"),
            country: fields.required_string("country"),
        }
    }

    fn sanitize(&mut self) {}

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        builder.check("city", || validate_length(&self.city, 1, MAX_CITY_LENGTH));
        builder.check("state", || validate_length(&self.state, 1, MAX_STATE_LENGTH));
        builder.check("country", || {
            validate_length(&self.country, 1, MAX_COUNTRY_LENGTH)
        });

        builder.build()
    }
}

impl Validatable for UpdatePersonRequest {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        UpdatePersonRequest {
            person: fields.record("person"),
            location: fields.record("location"),
        }
    }

    fn sanitize(&mut self) {
        self.person.sanitize();
        self.location.sanitize();
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();
        builder
            .nested("person", &self.person)
            .nested("location", &self.location);
        builder.build()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lookups
// ─────────────────────────────────────────────────────────────────────────────

impl Validatable for PersonQuery {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        PersonQuery {
            name: fields.optional_string("name"),
            age: fields.optional_int("age"),
        }
    }

    fn sanitize(&mut self) {}

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        builder.check("name", || {
            validate_length_optional(&self.name, MIN_QUERY_NAME_LENGTH, MAX_QUERY_NAME_LENGTH)
        });
        builder.check("age", || validate_gt_optional(self.age, MIN_QUERY_AGE_EXCLUSIVE));

        builder.build()
    }
}

impl Validatable for PersonIdPath {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        PersonIdPath {
            person_id: fields.required_int("person_id"),
        }
    }

    fn sanitize(&mut self) {}

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();
        builder.check("person_id", || validate_gt(self.person_id, MIN_PERSON_ID_EXCLUSIVE));
        builder.build()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────────────────────────

impl Validatable for LoginForm {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        LoginForm {
            username: fields.required_string("username"),
            password: fields.required_string("password"),
        }
    }

    fn sanitize(&mut self) {}

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        // The response model caps usernames at 20 characters, so reject
        // longer ones here instead of failing while building the response.
        builder.check("username", || {
            validate_length(&self.username, 1, MAX_USERNAME_LENGTH)
        });
        builder.check("password", || validate_required(&self.password, "password"));

        builder.build()
    }
}

impl Validatable for ContactForm {
    fn from_fields(fields: &mut FieldReader<'_>) -> Self {
        ContactForm {
            first_name: fields.required_string("first_name"),
            last_name: fields.required_string("last_name"),
            email: fields.required_string("email"),
            message: fields.required_string("message"),
        }
    }

    fn sanitize(&mut self) {
        self.email = sanitize_email(&self.email);
    }

    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut builder = ValidationBuilder::new();

        builder.check("first_name", || {
            validate_length(&self.first_name, 1, MAX_CONTACT_NAME_LENGTH)
        });
        builder.check("last_name", || {
            validate_length(&self.last_name, 1, MAX_CONTACT_NAME_LENGTH)
        });
        builder.check("email", || validate_email(&self.email));
        builder.check("message", || {
            validate_min_length(&self.message, MIN_CONTACT_MESSAGE_LENGTH)
        });

        builder.build()
    }
}
