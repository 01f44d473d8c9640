//! Form input schemas and validation.
//!
//! Raw form structs deserialize straight from
//! `application/x-www-form-urlencoded` bodies, so every field arrives as a
//! string. `validate()` turns a raw form into typed, trimmed values or a
//! [`FieldErrors`] map that the handler renders back into the page.

use std::collections::BTreeMap;

use serde::Deserialize;
use url::Url;

use greenbasket_core::{ItemCategory, StoreId, Username};

use crate::models::{GroceryItem, GroceryStore};

/// Maximum length of a store or item title/name.
const TITLE_MAX: usize = 80;
/// Maximum length of a store address.
const ADDRESS_MAX: usize = 200;

// =============================================================================
// Field Errors
// =============================================================================

/// Validation errors keyed by field name.
///
/// Each field maps to the ordered list of messages produced for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Create an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// The messages recorded for a field, in the order they were added.
    #[must_use]
    pub fn field(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// Whether any field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// Store Form
// =============================================================================

/// Raw input for creating or editing a grocery store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
}

/// Validated store fields, ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidStoreForm {
    pub title: String,
    pub address: String,
}

impl StoreForm {
    /// Pre-fill the form from an existing store (edit pages).
    #[must_use]
    pub fn from_store(store: &GroceryStore) -> Self {
        Self {
            title: store.title.clone(),
            address: store.address.clone(),
        }
    }

    /// Validate the raw input.
    ///
    /// # Errors
    ///
    /// Returns per-field messages when the title or address is missing or
    /// over length.
    pub fn validate(&self) -> Result<ValidStoreForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.add("title", "Title is required.");
        } else if title.chars().count() > TITLE_MAX {
            errors.add("title", format!("Title must be at most {TITLE_MAX} characters."));
        }

        let address = self.address.trim();
        if address.is_empty() {
            errors.add("address", "Address is required.");
        } else if address.chars().count() > ADDRESS_MAX {
            errors.add(
                "address",
                format!("Address must be at most {ADDRESS_MAX} characters."),
            );
        }

        if errors.is_empty() {
            Ok(ValidStoreForm {
                title: title.to_owned(),
                address: address.to_owned(),
            })
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Item Form
// =============================================================================

/// A store the item form may reference.
///
/// Handlers resolve the full list of selectable stores before validation, so
/// the form layer never runs its own query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOption {
    pub id: StoreId,
    pub title: String,
}

impl From<&GroceryStore> for StoreOption {
    fn from(store: &GroceryStore) -> Self {
        Self {
            id: store.id,
            title: store.title.clone(),
        }
    }
}

/// Raw input for creating or editing a grocery item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub store: String,
}

/// Validated item fields, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItemForm {
    pub name: String,
    pub price: f64,
    pub category: ItemCategory,
    pub photo_url: Option<Url>,
    pub store_id: StoreId,
}

impl ItemForm {
    /// Pre-fill the form from an existing item (edit pages).
    #[must_use]
    pub fn from_item(item: &GroceryItem) -> Self {
        Self {
            name: item.name.clone(),
            price: format!("{:.2}", item.price),
            category: item.category.value().to_owned(),
            photo_url: item
                .photo_url
                .as_ref()
                .map(Url::to_string)
                .unwrap_or_default(),
            store: item.store_id.to_string(),
        }
    }

    /// Validate the raw input against the list of selectable stores.
    ///
    /// Note that a negative price passes validation: the price only has to
    /// be numeric.
    ///
    /// # Errors
    ///
    /// Returns per-field messages for a missing/over-length name, a
    /// non-numeric price, a category outside the closed set, a malformed
    /// photo URL, or a store reference not in `stores`.
    pub fn validate(&self, stores: &[StoreOption]) -> Result<ValidItemForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Name is required.");
        } else if name.chars().count() > TITLE_MAX {
            errors.add("name", format!("Name must be at most {TITLE_MAX} characters."));
        }

        let price_input = self.price.trim();
        let price = if price_input.is_empty() {
            errors.add("price", "Price is required.");
            None
        } else {
            match price_input.parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    errors.add("price", "Price must be a number.");
                    None
                }
            }
        };

        let category = match self.category.trim().parse::<ItemCategory>() {
            Ok(value) => Some(value),
            Err(_) => {
                errors.add("category", "Select a valid category.");
                None
            }
        };

        let photo_input = self.photo_url.trim();
        let photo_url = if photo_input.is_empty() {
            None
        } else {
            match Url::parse(photo_input) {
                Ok(url) => Some(url),
                Err(_) => {
                    errors.add("photo_url", "Photo URL must be a valid URL.");
                    None
                }
            }
        };

        let store_id = match self.store.trim().parse::<i32>() {
            Ok(raw) => {
                let id = StoreId::new(raw);
                if stores.iter().any(|s| s.id == id) {
                    Some(id)
                } else {
                    errors.add("store", "Selected store does not exist.");
                    None
                }
            }
            Err(_) => {
                errors.add("store", "Select a store.");
                None
            }
        };

        match (errors.is_empty(), price, category, store_id) {
            (true, Some(price), Some(category), Some(store_id)) => Ok(ValidItemForm {
                name: name.to_owned(),
                price,
                category,
                photo_url,
                store_id,
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Raw signup input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Validated signup fields.
#[derive(Debug, Clone)]
pub struct ValidSignupForm {
    pub username: Username,
    pub password: String,
}

impl SignupForm {
    /// Validate the raw input.
    ///
    /// Password strength and username uniqueness are checked later by the
    /// auth service; this only enforces shape.
    ///
    /// # Errors
    ///
    /// Returns per-field messages for an invalid username or a missing
    /// password.
    pub fn validate(&self) -> Result<ValidSignupForm, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = match Username::parse(&self.username) {
            Ok(name) => Some(name),
            Err(e) => {
                errors.add("username", e.to_string());
                None
            }
        };

        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        }

        match (errors.is_empty(), username) {
            (true, Some(username)) => Ok(ValidSignupForm {
                username,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Raw login input.
///
/// Login failures never produce field-level errors; the handler renders a
/// single generic message so the response does not reveal whether the
/// username exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Carried through from the `?next=` login redirect.
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store_options() -> Vec<StoreOption> {
        vec![
            StoreOption {
                id: StoreId::new(1),
                title: "Corner Market".to_owned(),
            },
            StoreOption {
                id: StoreId::new(2),
                title: "Harvest Co-op".to_owned(),
            },
        ]
    }

    fn valid_item_form() -> ItemForm {
        ItemForm {
            name: "Sourdough Loaf".to_owned(),
            price: "4.50".to_owned(),
            category: "bakery".to_owned(),
            photo_url: String::new(),
            store: "1".to_owned(),
        }
    }

    // =========================================================================
    // FieldErrors
    // =========================================================================

    #[test]
    fn test_field_errors_preserve_message_order() {
        let mut errors = FieldErrors::new();
        errors.add("title", "first");
        errors.add("title", "second");

        assert_eq!(errors.field("title"), &["first", "second"]);
        assert!(errors.field("address").is_empty());
        assert!(!errors.is_empty());
    }

    // =========================================================================
    // StoreForm
    // =========================================================================

    #[test]
    fn test_store_form_valid_input_is_trimmed() {
        let form = StoreForm {
            title: "  Corner Market  ".to_owned(),
            address: " 123 Main St ".to_owned(),
        };

        let valid = form.validate().unwrap();
        assert_eq!(valid.title, "Corner Market");
        assert_eq!(valid.address, "123 Main St");
    }

    #[test]
    fn test_store_form_requires_title_and_address() {
        let form = StoreForm::default();
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.field("title"), &["Title is required."]);
        assert_eq!(errors.field("address"), &["Address is required."]);
    }

    #[test]
    fn test_store_form_rejects_over_length_fields() {
        let form = StoreForm {
            title: "t".repeat(81),
            address: "a".repeat(201),
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.field("title").len(), 1);
        assert_eq!(errors.field("address").len(), 1);
    }

    #[test]
    fn test_store_form_accepts_max_length_fields() {
        let form = StoreForm {
            title: "t".repeat(80),
            address: "a".repeat(200),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_store_form_from_store_round_trip() {
        let form = StoreForm {
            title: "Corner Market".to_owned(),
            address: "123 Main St".to_owned(),
        };
        let valid = form.validate().unwrap();
        assert_eq!(
            valid,
            ValidStoreForm {
                title: "Corner Market".to_owned(),
                address: "123 Main St".to_owned(),
            }
        );
    }

    // =========================================================================
    // ItemForm
    // =========================================================================

    #[test]
    fn test_item_form_valid_input() {
        let valid = valid_item_form().validate(&store_options()).unwrap();

        assert_eq!(valid.name, "Sourdough Loaf");
        assert!((valid.price - 4.5).abs() < f64::EPSILON);
        assert_eq!(valid.category, ItemCategory::Bakery);
        assert_eq!(valid.photo_url, None);
        assert_eq!(valid.store_id, StoreId::new(1));
    }

    #[test]
    fn test_item_form_rejects_category_outside_enumeration() {
        let form = ItemForm {
            category: "seafood".to_owned(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();

        assert_eq!(errors.field("category"), &["Select a valid category."]);
    }

    #[test]
    fn test_item_form_rejects_missing_category() {
        let form = ItemForm {
            category: String::new(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();

        assert_eq!(errors.field("category").len(), 1);
    }

    #[test]
    fn test_item_form_price_must_be_numeric() {
        let form = ItemForm {
            price: "four dollars".to_owned(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();

        assert_eq!(errors.field("price"), &["Price must be a number."]);
    }

    #[test]
    fn test_item_form_price_is_required() {
        let form = ItemForm {
            price: "  ".to_owned(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();

        assert_eq!(errors.field("price"), &["Price is required."]);
    }

    #[test]
    fn test_item_form_negative_price_is_not_rejected() {
        let form = ItemForm {
            price: "-1.25".to_owned(),
            ..valid_item_form()
        };
        let valid = form.validate(&store_options()).unwrap();
        assert!(valid.price < 0.0);
    }

    #[test]
    fn test_item_form_photo_url_is_optional() {
        let valid = valid_item_form().validate(&store_options()).unwrap();
        assert_eq!(valid.photo_url, None);
    }

    #[test]
    fn test_item_form_photo_url_must_parse_when_present() {
        let form = ItemForm {
            photo_url: "not a url".to_owned(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();
        assert_eq!(errors.field("photo_url").len(), 1);

        let form = ItemForm {
            photo_url: "https://example.com/loaf.jpg".to_owned(),
            ..valid_item_form()
        };
        let valid = form.validate(&store_options()).unwrap();
        assert_eq!(
            valid.photo_url.unwrap().as_str(),
            "https://example.com/loaf.jpg"
        );
    }

    #[test]
    fn test_item_form_store_must_be_in_option_list() {
        let form = ItemForm {
            store: "99".to_owned(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();
        assert_eq!(errors.field("store"), &["Selected store does not exist."]);
    }

    #[test]
    fn test_item_form_store_is_required() {
        let form = ItemForm {
            store: String::new(),
            ..valid_item_form()
        };
        let errors = form.validate(&store_options()).unwrap_err();
        assert_eq!(errors.field("store"), &["Select a store."]);
    }

    #[test]
    fn test_item_form_collects_errors_across_fields() {
        let form = ItemForm {
            name: String::new(),
            price: "abc".to_owned(),
            category: "nope".to_owned(),
            photo_url: "also not a url".to_owned(),
            store: String::new(),
        };
        let errors = form.validate(&store_options()).unwrap_err();

        for field in ["name", "price", "category", "photo_url", "store"] {
            assert_eq!(errors.field(field).len(), 1, "expected error on {field}");
        }
    }

    // =========================================================================
    // SignupForm
    // =========================================================================

    #[test]
    fn test_signup_form_valid_input() {
        let form = SignupForm {
            username: "alice".to_owned(),
            password: "correct horse".to_owned(),
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.username.as_str(), "alice");
        assert_eq!(valid.password, "correct horse");
    }

    #[test]
    fn test_signup_form_rejects_bad_username() {
        let form = SignupForm {
            username: "two words".to_owned(),
            password: "secretsecret".to_owned(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("username").len(), 1);
    }

    #[test]
    fn test_signup_form_requires_password() {
        let form = SignupForm {
            username: "alice".to_owned(),
            password: String::new(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.field("password"), &["Password is required."]);
    }
}
