//! Staff catalog-management route handlers.
//!
//! A single add-to-assortment form. Validation runs before anything touches
//! the database, so an invalid submission leaves no placeholder row behind.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use silver_pizza_core::PizzaKind;

use crate::db::pizzas::PizzaRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireStaff;
use crate::models::{CurrentUser, NewPizza};
use crate::services::cart::{self, CartSummary, GuestCart};
use crate::state::AppState;

/// Add-to-assortment form data.
///
/// Numeric fields arrive as strings so invalid input can re-render with the
/// submitted values intact.
#[derive(Debug, Default, Deserialize)]
pub struct NewPizzaForm {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub price: String,
    pub rating: String,
    pub kind: String,
}

/// Field-level validation errors for the add-to-assortment form.
#[derive(Debug, Default)]
pub struct NewPizzaFormErrors {
    pub name: Option<&'static str>,
    pub description: Option<&'static str>,
    pub image_url: Option<&'static str>,
    pub price: Option<&'static str>,
    pub rating: Option<&'static str>,
    pub kind: Option<&'static str>,
}

impl NewPizzaFormErrors {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
            && self.price.is_none()
            && self.rating.is_none()
            && self.kind.is_none()
    }
}

/// Validated form values, ready to insert.
#[derive(Debug)]
struct ValidatedPizza {
    name: String,
    description: String,
    image_url: String,
    price: i64,
    rating: i32,
    kind: PizzaKind,
}

fn validate(form: &NewPizzaForm) -> Result<ValidatedPizza, NewPizzaFormErrors> {
    let mut errors = NewPizzaFormErrors::default();

    let name = form.name.trim();
    if name.is_empty() {
        errors.name = Some("Please enter a name");
    }

    let description = form.description.trim();
    if description.is_empty() {
        errors.description = Some("Please enter a description");
    }

    let image_url = form.image_url.trim();
    if image_url.is_empty() {
        errors.image_url = Some("Please enter an image URL");
    }

    let price = match form.price.trim().parse::<i64>() {
        Ok(price) if price > 0 => Some(price),
        Ok(_) => {
            errors.price = Some("Price must be positive");
            None
        }
        Err(_) => {
            errors.price = Some("Price must be a whole number");
            None
        }
    };

    let rating = match form.rating.trim().parse::<i32>() {
        Ok(rating) if rating >= 0 => Some(rating),
        Ok(_) => {
            errors.rating = Some("Rating cannot be negative");
            None
        }
        Err(_) => {
            errors.rating = Some("Rating must be a whole number");
            None
        }
    };

    let kind = PizzaKind::from_slug(form.kind.trim());
    if kind.is_none() {
        errors.kind = Some("Please pick one of the four types");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // All Nones are ruled out by the error checks above.
    match (price, rating, kind) {
        (Some(price), Some(rating), Some(kind)) => Ok(ValidatedPizza {
            name: name.to_owned(),
            description: description.to_owned(),
            image_url: image_url.to_owned(),
            price,
            rating,
            kind,
        }),
        _ => Err(errors),
    }
}

/// Add-to-assortment page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/new_pizza.html")]
pub struct NewPizzaTemplate {
    pub pagename: &'static str,
    pub current_user: Option<CurrentUser>,
    pub cart: CartSummary,
    pub form: NewPizzaForm,
    pub errors: NewPizzaFormErrors,
    pub kinds: [PizzaKind; 4],
}

/// Display the add-to-assortment form.
#[instrument(skip(state))]
pub async fn new_pizza_page(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
) -> Result<NewPizzaTemplate, AppError> {
    let cart = cart::summarize(state.pool(), Some(&user), &GuestCart::Missing).await?;

    Ok(NewPizzaTemplate {
        pagename: "Add to assortment",
        current_user: Some(user),
        cart,
        form: NewPizzaForm::default(),
        errors: NewPizzaFormErrors::default(),
        kinds: PizzaKind::ALL,
    })
}

/// Handle the add-to-assortment form submission.
#[instrument(skip(state, form))]
pub async fn create_pizza(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Form(form): Form<NewPizzaForm>,
) -> Result<Response, AppError> {
    match validate(&form) {
        Ok(validated) => {
            let pizza = PizzaRepository::new(state.pool())
                .create(&NewPizza {
                    author_id: user.id,
                    name: validated.name,
                    description: validated.description,
                    image_url: validated.image_url,
                    price: validated.price,
                    rating: validated.rating,
                    kind: validated.kind,
                })
                .await?;

            tracing::info!(pizza_id = %pizza.id, name = %pizza.name, "Catalog item added");
            Ok(Redirect::to("/assortment/").into_response())
        }
        Err(errors) => {
            let cart = cart::summarize(state.pool(), Some(&user), &GuestCart::Missing).await?;
            Ok(NewPizzaTemplate {
                pagename: "Add to assortment",
                current_user: Some(user),
                cart,
                form,
                errors,
                kinds: PizzaKind::ALL,
            }
            .into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewPizzaForm {
        NewPizzaForm {
            name: "Margherita".to_string(),
            description: "Tomato, mozzarella, basil".to_string(),
            image_url: "/static/images/margherita.jpg".to_string(),
            price: "500".to_string(),
            rating: "4".to_string(),
            kind: "vegetarian".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_valid_form() {
        let validated = validate(&valid_form()).expect("valid form");
        assert_eq!(validated.price, 500);
        assert_eq!(validated.rating, 4);
        assert_eq!(validated.kind, PizzaKind::Vegetarian);
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut form = valid_form();
        form.price = "lots".to_string();
        form.rating = "-1".to_string();
        let errors = validate(&form).expect_err("invalid form");
        assert!(errors.price.is_some());
        assert!(errors.rating.is_some());
        assert!(errors.name.is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_kind() {
        let mut form = valid_form();
        form.kind = "hawaiian".to_string();
        let errors = validate(&form).expect_err("invalid form");
        assert!(errors.kind.is_some());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let errors = validate(&NewPizzaForm::default()).expect_err("invalid form");
        assert!(errors.name.is_some());
        assert!(errors.description.is_some());
        assert!(errors.image_url.is_some());
    }
}
