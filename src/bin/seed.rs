//! Seeds a PostgreSQL database with default accounts and sample clubs.
//!
//! Safe to run repeatedly: users are matched by email and clubs by name, and
//! only missing rows are inserted. The seeded firebase uids are placeholders;
//! replace them with real identity-provider uids before signing in.

use std::error::Error;

use tracing_subscriber::EnvFilter;

use clubsphere::adapters::http::Repositories;
use clubsphere::adapters::postgres::run_migrations;
use clubsphere::config::AppConfig;
use clubsphere::domain::club::{Club, ClubCategory, ClubStatus, NewClub};
use clubsphere::domain::foundation::{Money, Role};
use clubsphere::domain::user::User;
use clubsphere::ports::{ClubRepository, UserRepository};

const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/150";
const MANAGER_EMAIL: &str = "manager@clubsphere.com";

struct SeedUser {
    name: &'static str,
    email: &'static str,
    role: Role,
    uid: &'static str,
}

struct SeedClub {
    name: &'static str,
    description: &'static str,
    category: ClubCategory,
    location: &'static str,
    banner: &'static str,
    fee_cents: i64,
    status: ClubStatus,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        name: "Admin User",
        email: "admin@clubsphere.com",
        role: Role::Admin,
        uid: "admin-firebase-uid",
    },
    SeedUser {
        name: "Club Manager",
        email: MANAGER_EMAIL,
        role: Role::ClubManager,
        uid: "manager-firebase-uid",
    },
    SeedUser {
        name: "Member User",
        email: "member@clubsphere.com",
        role: Role::Member,
        uid: "member-firebase-uid",
    },
];

const CLUBS: &[SeedClub] = &[
    SeedClub {
        name: "Photography Enthusiasts",
        description: "A community for photography lovers to share techniques, organize photo walks, and improve their skills together.",
        category: ClubCategory::Photography,
        location: "New York, NY",
        banner: "https://images.unsplash.com/photo-1606983340126-99ab4feaa64a?w=800&h=400&fit=crop",
        fee_cents: 1500,
        status: ClubStatus::Approved,
    },
    SeedClub {
        name: "Tech Innovators",
        description: "Join fellow tech enthusiasts to discuss latest trends, share projects, and network with like-minded individuals.",
        category: ClubCategory::Tech,
        location: "San Francisco, CA",
        banner: "https://images.unsplash.com/photo-1518709268805-4e9042af2176?w=800&h=400&fit=crop",
        fee_cents: 0,
        status: ClubStatus::Approved,
    },
    SeedClub {
        name: "Hiking Adventures",
        description: "Explore beautiful trails and mountains with our hiking community. All skill levels welcome!",
        category: ClubCategory::Sports,
        location: "Denver, CO",
        banner: "https://images.unsplash.com/photo-1551632811-561732d1e306?w=800&h=400&fit=crop",
        fee_cents: 1000,
        status: ClubStatus::Approved,
    },
    SeedClub {
        name: "Book Lovers Society",
        description: "Monthly book discussions, author meetups, and literary events for passionate readers.",
        category: ClubCategory::Books,
        location: "Boston, MA",
        banner: "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=800&h=400&fit=crop",
        fee_cents: 500,
        status: ClubStatus::Pending,
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    if config.database.is_memory() {
        return Err("seeding requires the postgres backend".into());
    }

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    run_migrations(&pool).await?;
    let repos = Repositories::postgres(pool);

    seed_users(&repos).await?;
    seed_clubs(&repos).await?;

    tracing::info!("Seed data created");
    for user in USERS {
        tracing::info!(email = user.email, role = %user.role, "Default account");
    }
    tracing::warn!("Create these accounts in the identity provider and update their firebase uids");
    Ok(())
}

async fn seed_users(repos: &Repositories) -> Result<(), Box<dyn Error>> {
    for seed in USERS {
        if repos.users.find_by_email(seed.email).await?.is_some() {
            tracing::debug!(email = seed.email, "User exists, skipping");
            continue;
        }
        let mut user = User::register(
            seed.name,
            seed.email,
            Some(PLACEHOLDER_PHOTO.to_string()),
            seed.uid,
        )?;
        user.role = seed.role;
        repos.users.create(&user).await?;
        tracing::info!(email = seed.email, "Created user");
    }
    Ok(())
}

async fn seed_clubs(repos: &Repositories) -> Result<(), Box<dyn Error>> {
    let existing = repos.clubs.list_all(None).await?;

    for seed in CLUBS {
        if existing.iter().any(|club| club.club_name == seed.name) {
            tracing::debug!(club = seed.name, "Club exists, skipping");
            continue;
        }
        let mut club = Club::create(
            NewClub {
                club_name: seed.name.to_string(),
                description: seed.description.to_string(),
                category: seed.category,
                location: seed.location.to_string(),
                banner_image: Some(seed.banner.to_string()),
                membership_fee: Some(Money::from_cents(seed.fee_cents)?),
            },
            MANAGER_EMAIL,
        )?;
        if seed.status != ClubStatus::Pending {
            club.set_status(seed.status)?;
        }
        repos.clubs.create(&club).await?;
        tracing::info!(club = seed.name, "Created club");
    }
    Ok(())
}
