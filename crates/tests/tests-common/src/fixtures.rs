//! A small user schema and policy that the tests translate queries against.

use serde::Serialize;

use query_engine_metadata::metadata::{DescribeFields, FieldTypeMap};
use query_params_configuration::{version1::ParsedConfiguration, Policy};

pub const USER_ENTITY: &str = "user";

/// A user record, as the data source returns it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub age: i64,
    pub user_id: String,
    pub created_at: String,
    pub password: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub bio: String,
    pub birth_date: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Address {
    pub city: String,
    pub zip: i64,
}

impl DescribeFields for Address {
    fn field_types() -> FieldTypeMap {
        FieldTypeMap::builder().string("city").number("zip").build()
    }
}

impl DescribeFields for Profile {
    fn field_types() -> FieldTypeMap {
        FieldTypeMap::builder()
            .string("bio")
            .date("birthDate")
            .entity("address", Address::field_types())
            .build()
    }
}

impl DescribeFields for User {
    fn field_types() -> FieldTypeMap {
        FieldTypeMap::builder()
            .number("id")
            .string("email")
            .string("name")
            .number("age")
            .string("userId")
            .date("createdAt")
            .string("password")
            .entity("profile", Profile::field_types())
            .build()
    }
}

/// The field types of [`User`].
pub fn user_fields() -> FieldTypeMap {
    User::field_types()
}

/// A policy protecting the password, dropping tracing parameters and scoping by owner.
pub fn user_policy() -> Policy {
    Policy::empty()
        .with_forbidden_keys(["debug"])
        .with_sensitive_fields(["password"])
        .with_exclude_keys(["utm_source"])
        .with_request_fields(["userId"])
}

/// The configuration with the user entity and policy.
pub fn user_configuration() -> ParsedConfiguration {
    ParsedConfiguration::empty()
        .with_policy(user_policy())
        .with_entity(USER_ENTITY, user_fields())
}

/// `count` users with consecutive ids, all owned by `owner`.
pub fn users(count: i64, owner: &str) -> Vec<User> {
    (1..=count)
        .map(|id| User {
            id,
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            age: 20 + id,
            user_id: owner.to_string(),
            created_at: format!("2024-01-{:02}T00:00:00.000Z", (id % 28) + 1),
            password: "hunter2".to_string(),
            profile: Profile {
                bio: String::new(),
                birth_date: "2000-01-01T00:00:00.000Z".to_string(),
                address: Address {
                    city: "Oslo".to_string(),
                    zip: 150,
                },
            },
        })
        .collect()
}
