//! Top-ten points table.

use leptos::prelude::*;

use crate::net::types::LeaderboardEntry;

#[component]
pub fn Leaderboard() -> impl IntoView {
    let entries = RwSignal::new(None::<Vec<LeaderboardEntry>>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let rows = crate::net::api::fetch_leaderboard().await.unwrap_or_default();
        entries.set(Some(rows));
    });

    view! {
        <section class="leaderboard">
            <h2>"Leaderboard"</h2>
            <Show
                when=move || entries.get().is_some()
                fallback=|| view! { <p class="leaderboard__loading">"Loading leaderboard..."</p> }
            >
                <table class="leaderboard__table">
                    <thead>
                        <tr>
                            <th>"Rank"</th>
                            <th>"Name"</th>
                            <th>"Points"</th>
                            <th>"Workouts"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            entries
                                .get()
                                .unwrap_or_default()
                                .into_iter()
                                .enumerate()
                                .map(|(index, entry)| {
                                    view! {
                                        <tr>
                                            <td>{index + 1}</td>
                                            <td>{entry.display_name()}</td>
                                            <td>{entry.points}</td>
                                            <td>{entry.workouts_completed}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </section>
    }
}
