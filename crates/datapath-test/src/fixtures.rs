//! Test fixtures for common trees.

use serde_json::{Value, json};

/// A single user with a nested profile.
#[must_use]
pub fn user_profile() -> Value {
    json!({
        "user": {
            "profile": {
                "name": "John Doe",
                "email": "john@example.com"
            }
        }
    })
}

/// Three users, each with an email.
#[must_use]
pub fn users_with_emails() -> Value {
    json!({
        "users": [
            {"name": "Alice", "email": "a@x"},
            {"name": "Bob", "email": "b@x"},
            {"name": "Carol", "email": "c@x"}
        ]
    })
}

/// Three contact slots keyed by name rather than position.
#[must_use]
pub fn contact_slots() -> Value {
    json!({
        "contacts": {
            "primary": {"email": null, "label": "work"},
            "backup": {"email": null, "label": "home"},
            "legacy": {"email": null, "label": "old"}
        }
    })
}

/// A list where the middle element carries an explicit null.
#[must_use]
pub fn sparse_emails() -> Value {
    json!([
        {"e": "a@x"},
        {"e": null},
        {"e": "b@x"}
    ])
}

/// Two departments, each with two users, each with one post.
#[must_use]
pub fn departments() -> Value {
    json!({
        "departments": [
            {
                "name": "Engineering",
                "users": [
                    {"name": "Ann", "posts": [{"title": "Rust in production"}]},
                    {"name": "Ben", "posts": [{"title": "Zero-copy parsing"}]}
                ]
            },
            {
                "name": "Sales",
                "users": [
                    {"name": "Cat", "posts": [{"title": "Quarterly review"}]},
                    {"name": "Dan", "posts": [{"title": "Pipeline hygiene"}]}
                ]
            }
        ]
    })
}

/// An order with line items of mixed shape.
#[must_use]
pub fn order() -> Value {
    json!({
        "order": {
            "id": 1001,
            "customer": {"name": "Eve", "vip": true},
            "items": [
                {"sku": "A-1", "qty": 2, "price": 9.5},
                {"sku": "B-2", "qty": 1, "price": 20, "note": null},
                {"sku": "C-3", "qty": 5, "price": 1.25}
            ]
        }
    })
}
