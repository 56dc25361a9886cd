//! Seed the database with a starter catalog for development.
//!
//! Creates (or reuses) a staff account and inserts a handful of pizzas
//! authored by it. Seeding an already-populated catalog is a no-op.

use secrecy::SecretString;
use tracing::info;

use silver_pizza_core::{PizzaKind, Username};
use silver_pizza_web::db::pizzas::PizzaRepository;
use silver_pizza_web::db::users::UserRepository;
use silver_pizza_web::models::{NewPizza, User};
use silver_pizza_web::services::AuthService;
use silver_pizza_web::services::auth::AuthError;

use super::{CliError, database_url};

/// A starter catalog entry.
struct SeedPizza {
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    price: i64,
    rating: i32,
    kind: PizzaKind,
}

const STARTER_CATALOG: &[SeedPizza] = &[
    SeedPizza {
        name: "Chicken BBQ",
        description: "Smoked chicken, red onion, barbecue sauce",
        image_url: "/static/images/chicken-bbq.jpg",
        price: 550,
        rating: 5,
        kind: PizzaKind::Chicken,
    },
    SeedPizza {
        name: "Beef Supreme",
        description: "Ground beef, peppers, mozzarella",
        image_url: "/static/images/beef-supreme.jpg",
        price: 620,
        rating: 4,
        kind: PizzaKind::Beef,
    },
    SeedPizza {
        name: "Hunter's Sausage",
        description: "Smoked sausage, pickles, mustard sauce",
        image_url: "/static/images/hunters-sausage.jpg",
        price: 580,
        rating: 3,
        kind: PizzaKind::Sausage,
    },
    SeedPizza {
        name: "Margherita",
        description: "Tomato, mozzarella, basil",
        image_url: "/static/images/margherita.jpg",
        price: 450,
        rating: 5,
        kind: PizzaKind::Vegetarian,
    },
];

/// Seed the starter catalog.
///
/// # Errors
///
/// Returns an error if the database is unreachable, the staff account cannot
/// be created, or an insert fails.
pub async fn run(username: &str, password: &str) -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let database_url: SecretString = database_url()?;
    let pool = silver_pizza_web::db::create_pool(&database_url).await?;

    let staff = ensure_staff_user(&pool, username, password).await?;

    let pizzas = PizzaRepository::new(&pool);
    if !pizzas.list(None).await?.is_empty() {
        info!("Catalog already has pizzas; nothing to seed");
        return Ok(());
    }

    for seed in STARTER_CATALOG {
        let pizza = pizzas
            .create(&NewPizza {
                author_id: staff.id,
                name: seed.name.to_owned(),
                description: seed.description.to_owned(),
                image_url: seed.image_url.to_owned(),
                price: seed.price,
                rating: seed.rating,
                kind: seed.kind,
            })
            .await?;
        info!(pizza_id = %pizza.id, name = %pizza.name, "Seeded pizza");
    }

    info!("Seeding complete!");
    Ok(())
}

/// Create the staff account if it does not exist, and make sure it carries
/// the staff flag either way.
async fn ensure_staff_user(
    pool: &sqlx::PgPool,
    username: &str,
    password: &str,
) -> Result<User, CliError> {
    let auth = AuthService::new(pool);
    let users = UserRepository::new(pool);

    match auth.register(username, password).await {
        Ok(user) => {
            info!(username = %user.username, "Created staff account");
        }
        Err(AuthError::UserAlreadyExists) => {
            info!(username, "Staff account already exists");
        }
        Err(e) => return Err(e.into()),
    }

    let parsed = Username::parse(username)?;
    users.set_staff(&parsed, true).await?;

    users
        .get_by_username(&parsed)
        .await?
        .ok_or(silver_pizza_web::db::RepositoryError::NotFound)
        .map_err(CliError::Repository)
}
