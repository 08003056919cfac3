//! Database bootstrap: default covers, pictures, admin, and sample data.

use crate::error::Result;
use crate::{admins, auth, listeners, pictures, playlists};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

/// Path recorded for the generic playlist cover shipped with the app.
pub const DEFAULT_COVER_PATH: &str = "assets/service/DefaultCover.png";
/// Path recorded for the favorites playlist cover.
pub const FAVORITES_COVER_PATH: &str = "assets/service/FavoritesCover.png";
/// Path recorded for the default profile picture.
pub const DEFAULT_PROFILE_PICTURE_PATH: &str = "assets/service/DefaultPicture.png";

const DEFAULT_ADMIN_LOGIN: &str = "Admin";

/// Ensure the rows every flow depends on exist: the two playlist covers,
/// the default profile picture, and the default admin. Idempotent.
pub async fn ensure_defaults(pool: &SqlitePool) -> Result<()> {
    if pictures::playlist_cover_by_path(pool, DEFAULT_COVER_PATH)
        .await?
        .is_none()
    {
        pictures::insert_playlist_cover(pool, DEFAULT_COVER_PATH).await?;
        pictures::insert_playlist_cover(pool, FAVORITES_COVER_PATH).await?;
        info!("seeded playlist covers");
    }

    if pictures::profile_picture_by_path(pool, DEFAULT_PROFILE_PICTURE_PATH)
        .await?
        .is_none()
    {
        pictures::insert_profile_picture(pool, DEFAULT_PROFILE_PICTURE_PATH).await?;
        info!("seeded default profile picture");
    }

    if admins::count(pool).await? == 0 {
        admins::create(
            pool,
            DEFAULT_ADMIN_LOGIN,
            &auth::sha256_hex(DEFAULT_ADMIN_LOGIN),
        )
        .await?;
        info!("seeded default admin");
    }

    Ok(())
}

/// Populate a handful of sample listener accounts (dev databases).
/// No-op when any listener already exists.
pub async fn sample_listeners(pool: &SqlitePool) -> Result<()> {
    if listeners::count(pool).await? > 0 {
        return Ok(());
    }

    let default_picture = pictures::default_profile_picture(pool).await?;

    let samples: [(&str, &str, &str, bool, (i32, u32, u32)); 6] = [
        ("Maya Reyes", "maya.reyes@example.com", "maya2024", false, (2024, 1, 10)),
        ("Owen Fletcher", "owen.f@example.com", "owen2024", false, (2024, 2, 14)),
        ("Ida Lindqvist", "ida.lindqvist@example.com", "ida2024", false, (2024, 3, 22)),
        ("Tomas Vargas", "tomas.vargas@example.com", "tomas2024", true, (2024, 4, 8)),
        ("June Park", "june.park@example.com", "june2024", false, (2024, 7, 12)),
        ("Ezra Whitfield", "ezra.w@example.com", "ezra2025", false, (2025, 2, 25)),
    ];

    for (name, email, password, banned, (y, m, d)) in samples {
        let listener = listeners::create(
            pool,
            listeners::CreateListener {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: auth::sha256_hex(password),
                profile_picture_id: default_picture.id,
            },
        )
        .await?;

        // Backdate the registration for the report page.
        if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
            sqlx::query("UPDATE listeners SET created_at = ? WHERE id = ?")
                .bind(date)
                .bind(listener.id)
                .execute(pool)
                .await?;
        }

        if banned {
            listeners::toggle_ban(pool, listener.id).await?;
        }

        playlists::create_for_listener(pool, listener.id).await?;
    }

    info!("seeded sample listeners");
    Ok(())
}
