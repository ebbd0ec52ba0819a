// Bulb endpoints
//
// Persistence (`/crud/bulbs`) and live control (`/wiz/...`). Control
// endpoints accept either a concrete address or the broadcast token
// `all`; the backend answers with the refreshed records of every bulb
// it touched.

use std::time::Duration;

use tracing::debug;

use crate::client::BulbClient;
use crate::error::Error;
use crate::models::BulbRecord;

/// Path token the backend interprets as "every known bulb".
pub const BROADCAST_ADDRESS: &str = "all";

impl BulbClient {
    // ── Persistence ──────────────────────────────────────────────────

    /// List the persisted inventory.
    ///
    /// `GET /crud/bulbs`
    pub async fn list_bulbs(&self) -> Result<Vec<BulbRecord>, Error> {
        let url = self.endpoint(&["crud", "bulbs"])?;
        debug!("listing bulbs");
        self.get_bulbs(url, None).await
    }

    /// Fetch a single persisted bulb. A missing bulb is a 404 status error.
    ///
    /// `GET /crud/bulbs/{ip}`
    pub async fn get_bulb(&self, ip: &str) -> Result<BulbRecord, Error> {
        let url = self.endpoint(&["crud", "bulbs", ip])?;
        debug!(ip, "fetching bulb");
        self.get_json(url).await
    }

    /// Persist a bulb record (only the name is honored by the backend).
    ///
    /// `PUT /crud/bulbs/{ip}` with the full record as body.
    pub async fn update_bulb(&self, record: &BulbRecord) -> Result<Vec<BulbRecord>, Error> {
        let url = self.endpoint(&["crud", "bulbs", record.ip.as_str()])?;
        debug!(ip = %record.ip, name = ?record.name, "updating bulb");
        self.put_bulbs(url, record).await
    }

    /// Remove a bulb from the inventory.
    ///
    /// `DELETE /crud/bulbs/{ip}`
    pub async fn delete_bulb(&self, ip: &str) -> Result<(), Error> {
        let url = self.endpoint(&["crud", "bulbs", ip])?;
        debug!(ip, "deleting bulb");
        self.delete(url).await
    }

    // ── Discovery ────────────────────────────────────────────────────

    /// Run network discovery and return the refreshed inventory.
    ///
    /// The backend polls every bulb in turn, so this call gets its own
    /// request timeout instead of the client-wide one.
    ///
    /// `GET /wiz/scan`
    pub async fn scan(&self, timeout: Duration) -> Result<Vec<BulbRecord>, Error> {
        let url = self.endpoint(&["wiz", "scan"])?;
        debug!(?timeout, "scanning for bulbs");
        self.get_bulbs(url, Some(timeout)).await
    }

    // ── Control ──────────────────────────────────────────────────────

    /// Switch a bulb (or `all`) on at full brightness.
    ///
    /// `GET /wiz/on/{ip}`
    pub async fn power_on(&self, target: &str) -> Result<Vec<BulbRecord>, Error> {
        let url = self.endpoint(&["wiz", "on", target])?;
        debug!(bulb = target, "power on");
        self.get_bulbs(url, None).await
    }

    /// Switch a bulb (or `all`) off.
    ///
    /// `GET /wiz/off/{ip}`
    pub async fn power_off(&self, target: &str) -> Result<Vec<BulbRecord>, Error> {
        let url = self.endpoint(&["wiz", "off", target])?;
        debug!(bulb = target, "power off");
        self.get_bulbs(url, None).await
    }

    /// Apply a scene code to a bulb (or `all`).
    ///
    /// `GET /wiz/scene/{ip}/{scene_id}`
    pub async fn apply_scene(&self, target: &str, scene_id: i32) -> Result<Vec<BulbRecord>, Error> {
        let scene = scene_id.to_string();
        let url = self.endpoint(&["wiz", "scene", target, scene.as_str()])?;
        debug!(bulb = target, scene_id, "apply scene");
        self.get_bulbs(url, None).await
    }

    /// Apply a scene, or switch off bulbs already showing it.
    ///
    /// `GET /wiz/toggle/{ip}/{scene_id}`
    pub async fn toggle_scene(
        &self,
        target: &str,
        scene_id: i32,
    ) -> Result<Vec<BulbRecord>, Error> {
        let scene = scene_id.to_string();
        let url = self.endpoint(&["wiz", "toggle", target, scene.as_str()])?;
        debug!(bulb = target, scene_id, "toggle scene");
        self.get_bulbs(url, None).await
    }
}
