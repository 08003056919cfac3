//! Line-driven frontend.
//!
//! Renders pages as numbered card lists and forwards activations to the
//! shell. The 250 ms tick doubles as the render loop: it drives playback
//! continuation and drains playback events for the now-playing line.

use cadenza_shell::{App, Card, CardAction, CardKind, Opened, RegistrationForm};
use cadenza_playback::PlaybackEvent;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const TICK: Duration = Duration::from_millis(250);

pub async fn run(mut app: App) -> anyhow::Result<()> {
    println!("cadenza — type `help` for commands");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut ticker = tokio::time::interval(TICK);

    // Cards of the page currently on screen; `open <n>` indexes these.
    let mut shown: Vec<Card> = Vec::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                app.tick();
                report_events(&mut app);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !dispatch(&mut app, line.trim(), &mut shown).await {
                    break;
                }
                report_events(&mut app);
            }
        }
    }

    Ok(())
}

fn report_events(app: &mut App) {
    for event in app.player.drain_events() {
        match event {
            PlaybackEvent::TrackChanged { key, .. } => {
                if let Some(track) = app.player.current_track() {
                    println!("▶ {} — {}", track.title, track.artist);
                } else {
                    println!("▶ {key}");
                }
            }
            PlaybackEvent::StateChanged { state } => println!("state: {state:?}"),
            PlaybackEvent::TrackFinished { .. } => {}
            PlaybackEvent::VolumeChanged { level, muted } => {
                if muted {
                    println!("volume: muted");
                } else {
                    println!("volume: {:.0}%", level * 100.0);
                }
            }
            PlaybackEvent::Error { message } => println!("! {message}"),
        }
    }
}

fn render(cards: &[Card]) {
    if cards.is_empty() {
        println!("(nothing here)");
        return;
    }
    for (i, card) in cards.iter().enumerate() {
        let glyph = match card.kind {
            CardKind::Track => "♪",
            CardKind::Album => "◉",
            CardKind::Artist => "✦",
            CardKind::Playlist => "≡",
            CardKind::Listener => "@",
        };
        if card.subtitle.is_empty() {
            println!("{:>3}. {glyph} {}", i + 1, card.title);
        } else {
            println!("{:>3}. {glyph} {} — {}", i + 1, card.title, card.subtitle);
        }
    }
}

async fn dispatch(app: &mut App, line: &str, shown: &mut Vec<Card>) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };
    let rest: Vec<&str> = parts.collect();

    let outcome = match command {
        "quit" | "exit" => return false,
        "help" => {
            print_help();
            Ok(())
        }
        "home" => page(app.home().await.map(|v| {
            let mut cards = v.track_cards;
            cards.extend(v.album_cards);
            cards.extend(v.artist_cards);
            cards
        }), shown),
        "search" => {
            let query = rest.join(" ");
            page(
                app.search_input_changed(&query).await.map(|view| {
                    view.map(|v| {
                        let mut cards = v.track_cards;
                        cards.extend(v.album_cards);
                        cards.extend(v.artist_cards);
                        cards
                    })
                    .unwrap_or_default()
                }),
                shown,
            )
        }
        "open" | "play" => match pick(&rest, shown) {
            Some(card) => match app.activate(card).await {
                Ok(Opened::Album(view)) => {
                    *shown = view.track_cards;
                    render(shown);
                    Ok(())
                }
                Ok(Opened::Artist(view)) => {
                    *shown = view
                        .track_cards
                        .into_iter()
                        .chain(view.album_cards)
                        .collect();
                    render(shown);
                    Ok(())
                }
                Ok(Opened::Collection(view)) => {
                    *shown = view.track_cards;
                    render(shown);
                    Ok(())
                }
                Ok(Opened::BanToggled { banned, .. }) => {
                    println!("ban status now: {banned}");
                    Ok(())
                }
                Ok(Opened::Played) => Ok(()),
                Err(err) => Err(err),
            },
            None => {
                println!("usage: open <number>");
                Ok(())
            }
        },
        "library" => page(app.library_page().await, shown),
        "history" => {
            *shown = app.history_cards();
            render(shown);
            Ok(())
        }
        "banlist" => page(app.ban_list_page(&rest.join(" ")).await, shown),
        "stats" => match app.statistics_page().await {
            Ok(stats) => {
                println!("listeners: {}", stats.total_listeners);
                println!("playlists: {}", stats.total_playlists);
                println!("catalog audio items: {}", stats.catalog.total_audio_items);
                if let Some(artist) = &stats.catalog.most_popular_artist {
                    println!("top artist: {}", artist.name);
                }
                for (genre, count) in &stats.catalog.genre_stats {
                    println!("  {genre}: {count}");
                }
                Ok(())
            }
            Err(err) => Err(err),
        },
        "report" => match app.report_page().await {
            Ok(report) => {
                println!(
                    "listeners: {} ({} banned)",
                    report.total_listeners, report.banned_accounts
                );
                for (month, count) in &report.registrations_per_month {
                    println!("  {month}: {count}");
                }
                Ok(())
            }
            Err(err) => Err(err),
        },
        "toggle" | "pause" | "resume" => {
            app.toggle_playback();
            Ok(())
        }
        "stop" => {
            app.player.stop();
            Ok(())
        }
        "next" => {
            app.next_track();
            Ok(())
        }
        "prev" => {
            app.previous_track();
            Ok(())
        }
        "seek" => {
            if let Some(secs) = rest.first().and_then(|s| s.parse::<u64>().ok()) {
                if let Err(err) = app.player.seek(Duration::from_secs(secs)) {
                    warn!(error = %err, "seek failed");
                }
            } else {
                println!("usage: seek <seconds>");
            }
            Ok(())
        }
        "vol" => {
            if let Some(pct) = rest.first().and_then(|s| s.parse::<f32>().ok()) {
                app.player.set_volume(pct / 100.0);
            } else {
                println!("usage: vol <0-100>");
            }
            Ok(())
        }
        "mute" => {
            app.player.toggle_mute();
            Ok(())
        }
        "pos" => {
            match (app.player.position(), app.player.duration()) {
                (Some(pos), Some(total)) => {
                    println!("{} / {}", format_time(pos), format_time(total));
                }
                (Some(pos), None) => println!("{}", format_time(pos)),
                _ => println!("nothing playing"),
            }
            Ok(())
        }
        "register" => match rest.as_slice() {
            [name, email, password] => app
                .register(&RegistrationForm {
                    name: (*name).to_string(),
                    email: (*email).to_string(),
                    password: (*password).to_string(),
                    confirmation: (*password).to_string(),
                })
                .await
                .map(|listener| println!("registered {} — now `login`", listener.email)),
            _ => {
                println!("usage: register <name> <email> <password>");
                Ok(())
            }
        },
        "login" => match rest.as_slice() {
            [email, password] => app
                .login(email, password)
                .await
                .map(|listener| println!("signed in as {}", listener.name)),
            _ => {
                println!("usage: login <email> <password>");
                Ok(())
            }
        },
        "admin" => match rest.as_slice() {
            [login, password] => app
                .login_admin(login, password)
                .await
                .map(|()| println!("admin session started")),
            _ => {
                println!("usage: admin <login> <password>");
                Ok(())
            }
        },
        "logout" => {
            app.session.logout();
            println!("signed out");
            Ok(())
        }
        "passwd" => match rest.as_slice() {
            [current, new_password] => {
                let pool = app.pool().clone();
                app.session
                    .change_password(&pool, current, new_password, new_password)
                    .await
                    .map(|()| println!("password changed"))
            }
            _ => {
                println!("usage: passwd <current> <new>");
                Ok(())
            }
        },
        "profile" => match rest.as_slice() {
            [name, email] => {
                let pool = app.pool().clone();
                app.session
                    .update_profile(&pool, name, email, None)
                    .await
                    .map(|listener| println!("profile updated: {} <{}>", listener.name, listener.email))
            }
            _ => {
                println!("usage: profile <name> <email>");
                Ok(())
            }
        },
        "newpl" => match app.session.listener().map(|l| l.id) {
            Some(listener_id) => {
                let pool = app.pool().clone();
                app.library
                    .create_playlist(&pool, listener_id)
                    .await
                    .map(|playlist| println!("created \"{}\"", playlist.title))
            }
            None => {
                println!("sign in first");
                Ok(())
            }
        },
        "add" => match (pick(&rest, shown), rest.get(1).and_then(|s| s.parse::<i64>().ok())) {
            (Some(card), Some(playlist_id)) => {
                if let CardAction::PlayTrack { track, .. } = &card.action {
                    let pool = app.pool().clone();
                    app.library
                        .add_track(&pool, playlist_id, &track.id)
                        .await
                        .map(|playlist| {
                            println!("added to \"{}\" ({} tracks)", playlist.title, playlist.track_keys.len());
                        })
                } else {
                    println!("card {} is not a track", rest[0]);
                    Ok(())
                }
            }
            _ => {
                println!("usage: add <track-number> <playlist-id>");
                Ok(())
            }
        },
        "back" => {
            match app.back() {
                Some(target) => println!("back to {target:?}"),
                None => println!("no back entry"),
            }
            Ok(())
        }
        "forward" => {
            match app.forward() {
                Some(target) => println!("forward to {target:?}"),
                None => println!("no forward entry"),
            }
            Ok(())
        }
        other => {
            println!("unknown command: {other} (try `help`)");
            Ok(())
        }
    };

    if let Err(err) = outcome {
        println!("! {err}");
    }
    true
}

fn page(result: cadenza_core::Result<Vec<Card>>, shown: &mut Vec<Card>) -> cadenza_core::Result<()> {
    let cards = result?;
    *shown = cards;
    render(shown);
    Ok(())
}

fn pick(rest: &[&str], shown: &[Card]) -> Option<Card> {
    let index = rest.first()?.parse::<usize>().ok()?;
    shown.get(index.checked_sub(1)?).cloned()
}

fn format_time(d: Duration) -> String {
    let total = d.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

fn print_help() {
    println!(
        "pages:     home · search <text> · open <n> · library · history · back · forward\n\
         playback:  play <n> · toggle · stop · next · prev · seek <s> · vol <0-100> · mute · pos\n\
         account:   register <name> <email> <pass> · login <email> <pass> · logout · passwd <cur> <new> · profile <name> <email>\n\
         playlists: newpl · add <track-number> <playlist-id>\n\
         admin:     admin <login> <pass> · banlist [name] · stats · report\n\
         quit"
    );
}
