//! Records exchanged with the API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// One blocked artist on the user's DNP list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnpEntry {
    pub artist: Artist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub curator: String,
    #[serde(default)]
    pub artist_count: u32,
    #[serde(default)]
    pub subscriber_count: u32,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub list_id: String,
    /// `None` follows the latest version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_pinned: Option<u32>,
    #[serde(default)]
    pub auto_update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Spotify,
    AppleMusic,
    Tidal,
    YoutubeMusic,
    Deezer,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Spotify => "Spotify",
            Provider::AppleMusic => "Apple Music",
            Provider::Tidal => "Tidal",
            Provider::YoutubeMusic => "YouTube Music",
            Provider::Deezer => "Deezer",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Active,
    Expired,
    Error,
}

/// A streaming service the user has linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConnection {
    pub provider: Provider,
    pub status: ConnectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggressiveness {
    /// Only tracks where the artist is the primary performer.
    Conservative,
    #[default]
    Moderate,
    /// Also features, collaborations and songwriter credits.
    Aggressive,
}

/// Projected changes for one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderImpact {
    pub provider: Option<Provider>,
    #[serde(default)]
    pub tracks_to_remove: u32,
    #[serde(default)]
    pub albums_to_remove: u32,
    #[serde(default)]
    pub playlists_to_modify: u32,
    #[serde(default)]
    pub artists_to_unfollow: u32,
}

impl ProviderImpact {
    /// Widened to `u64`; four `u32` counts cannot overflow it.
    pub fn total_changes(&self) -> u64 {
        u64::from(self.tracks_to_remove)
            + u64::from(self.albums_to_remove)
            + u64::from(self.playlists_to_modify)
            + u64::from(self.artists_to_unfollow)
    }
}

/// Dry-run result describing what enforcement would change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementPlan {
    pub plan_id: String,
    #[serde(default = "default_true")]
    pub dry_run: bool,
    #[serde(default)]
    pub aggressiveness: Aggressiveness,
    #[serde(default)]
    pub impacts: Vec<ProviderImpact>,
}

fn default_true() -> bool {
    true
}

impl EnforcementPlan {
    /// Sum of all provider impacts, saturating at `u32::MAX` per count.
    pub fn totals(&self) -> ProviderImpact {
        self.impacts
            .iter()
            .fold(ProviderImpact::default(), |mut acc, impact| {
                acc.tracks_to_remove = acc.tracks_to_remove.saturating_add(impact.tracks_to_remove);
                acc.albums_to_remove = acc.albums_to_remove.saturating_add(impact.albums_to_remove);
                acc.playlists_to_modify =
                    acc.playlists_to_modify.saturating_add(impact.playlists_to_modify);
                acc.artists_to_unfollow =
                    acc.artists_to_unfollow.saturating_add(impact.artists_to_unfollow);
                acc
            })
    }

    pub fn is_empty(&self) -> bool {
        self.totals().total_changes() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementRun {
    pub run_id: String,
    pub plan_id: String,
    pub status: RunStatus,
}

/// Window for analytics queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::Year => "1y",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRevenue {
    pub artist_id: String,
    pub artist_name: String,
    pub streams: u64,
    /// Estimated payout, in the account currency.
    pub revenue: f64,
    /// Whether the artist is on the user's DNP list.
    #[serde(default)]
    pub blocked: bool,
}

/// Where a user's streaming money went over a time range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    pub range: TimeRange,
    pub total_streams: u64,
    pub total_revenue: f64,
    #[serde(default)]
    pub artists: Vec<ArtistRevenue>,
}

impl RevenueBreakdown {
    /// Artists by revenue, highest first.
    pub fn top_artists(&self, n: usize) -> Vec<&ArtistRevenue> {
        let mut artists: Vec<&ArtistRevenue> = self.artists.iter().collect();
        artists.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        artists.truncate(n);
        artists
    }

    /// Fraction (`0.0..=1.0`) of revenue that still went to blocked artists.
    pub fn blocked_revenue_share(&self) -> f64 {
        if self.total_revenue <= 0.0 {
            return 0.0;
        }
        let blocked: f64 = self
            .artists
            .iter()
            .filter(|a| a.blocked)
            .map(|a| a.revenue)
            .sum();
        (blocked / self.total_revenue).clamp(0.0, 1.0)
    }

    /// Share of the total for one artist, as a percentage.
    pub fn share_percent(&self, artist: &ArtistRevenue) -> f64 {
        if self.total_revenue <= 0.0 {
            return 0.0;
        }
        artist.revenue / self.total_revenue * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn artist_revenue(id: &str, revenue: f64, blocked: bool) -> ArtistRevenue {
        ArtistRevenue {
            artist_id: id.to_string(),
            artist_name: id.to_uppercase(),
            streams: 10,
            revenue,
            blocked,
        }
    }

    #[test]
    fn test_provider_wire_names() {
        let provider: Provider = serde_json::from_value(json!("apple_music")).unwrap();
        assert_eq!(provider, Provider::AppleMusic);
        assert_eq!(
            serde_json::to_value(Provider::YoutubeMusic).unwrap(),
            json!("youtube_music")
        );
        assert_eq!(Provider::YoutubeMusic.to_string(), "YouTube Music");
    }

    #[test]
    fn test_time_range_wire_names() {
        assert_eq!(serde_json::to_value(TimeRange::Quarter).unwrap(), json!("90d"));
        let range: TimeRange = serde_json::from_value(json!("1y")).unwrap();
        assert_eq!(range, TimeRange::Year);
        assert_eq!(TimeRange::Week.as_str(), "7d");
    }

    #[test]
    fn test_dnp_entry_optional_fields() {
        let entry: DnpEntry = serde_json::from_value(json!({
            "artist": {"id": "a1", "name": "Artist One"}
        }))
        .unwrap();
        assert!(entry.note.is_none());
        assert!(entry.artist.genres.is_empty());
    }

    #[test]
    fn test_plan_totals() {
        let plan: EnforcementPlan = serde_json::from_value(json!({
            "plan_id": "p1",
            "impacts": [
                {"provider": "spotify", "tracks_to_remove": 12, "albums_to_remove": 1},
                {"provider": "tidal", "tracks_to_remove": 3, "artists_to_unfollow": 2}
            ]
        }))
        .unwrap();
        assert!(plan.dry_run);
        assert_eq!(plan.aggressiveness, Aggressiveness::Moderate);
        let totals = plan.totals();
        assert_eq!(totals.tracks_to_remove, 15);
        assert_eq!(totals.total_changes(), 18);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_plan_totals_large_counts_do_not_overflow() {
        let plan: EnforcementPlan = serde_json::from_value(json!({
            "plan_id": "p2",
            "impacts": [
                {"provider": "spotify", "tracks_to_remove": 4_000_000_000u32, "albums_to_remove": 4_000_000_000u32},
                {"provider": "deezer", "tracks_to_remove": 4_000_000_000u32}
            ]
        }))
        .unwrap();
        let totals = plan.totals();
        assert_eq!(totals.tracks_to_remove, u32::MAX);
        assert_eq!(totals.albums_to_remove, 4_000_000_000);
        assert_eq!(totals.total_changes(), u64::from(u32::MAX) + 4_000_000_000);
        assert_eq!(plan.impacts[0].total_changes(), 8_000_000_000);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_revenue_helpers() {
        let breakdown = RevenueBreakdown {
            range: TimeRange::Month,
            total_streams: 30,
            total_revenue: 10.0,
            artists: vec![
                artist_revenue("a", 2.0, true),
                artist_revenue("b", 5.0, false),
                artist_revenue("c", 3.0, true),
            ],
        };
        let top: Vec<String> = breakdown
            .top_artists(2)
            .iter()
            .map(|a| a.artist_id.clone())
            .collect();
        assert_eq!(top, vec!["b", "c"]);
        assert!((breakdown.blocked_revenue_share() - 0.5).abs() < f64::EPSILON);
        assert!((breakdown.share_percent(&breakdown.artists[1]) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_revenue_helpers_zero_total() {
        let breakdown = RevenueBreakdown {
            range: TimeRange::Week,
            total_streams: 0,
            total_revenue: 0.0,
            artists: vec![],
        };
        assert_eq!(breakdown.blocked_revenue_share(), 0.0);
        assert!(breakdown.top_artists(5).is_empty());
    }
}
