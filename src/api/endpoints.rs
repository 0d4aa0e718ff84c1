//! One method per remote operation.

use bytes::Bytes;

use super::client::{ApiClient, UploadFile, segment};
use super::error::Result;
use crate::schema::{
    AnnouncementsResponse, ChangeEmailRequest, ChangePasswordRequest, ChangeUsernameRequest,
    CreateSessionRequest, Empty, GhostFileResponse, GhostFilesResponse, GhostInfoRequest,
    LevelsResponse, LoginRequest, ProfileInfoResponse, QuotaResponse, RegisterRequest,
    ServerInfoResponse, SessionAccessRequest, SessionResponse, SessionsPlayersRequest,
    SessionsResponse, SuccessResponse, TagsResponse,
};

impl ApiClient {
    // -- site ---------------------------------------------------------------

    pub async fn get_server_info(&self) -> Result<ServerInfoResponse> {
        self.get("/api/v0/server-info").await
    }

    pub async fn get_tags(&self) -> Result<TagsResponse> {
        self.get("/api/v0/tags").await
    }

    pub async fn get_announcements(&self) -> Result<AnnouncementsResponse> {
        self.get("/api/v0/announcements").await
    }

    // -- sessions -----------------------------------------------------------

    pub async fn get_sessions(&self) -> Result<SessionsResponse> {
        self.get("/api/v0/sessions").await
    }

    pub async fn create_session(&self, body: &CreateSessionRequest) -> Result<SuccessResponse> {
        self.post("/api/v0/sessions", body).await
    }

    /// `session` is `None` when the id is unknown.
    pub async fn get_session(&self, session_id: &str) -> Result<SessionResponse> {
        self.get(&format!("/api/v0/sessions/{}", segment(session_id)))
            .await
    }

    pub async fn edit_session(
        &self,
        session_id: &str,
        body: &CreateSessionRequest,
    ) -> Result<SuccessResponse> {
        self.post(&format!("/api/v0/sessions/{}", segment(session_id)), body)
            .await
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<SuccessResponse> {
        self.delete(&format!("/api/v0/sessions/{}", segment(session_id)))
            .await
    }

    /// Ask whether a player may join a session. Used by the game server,
    /// which authenticates with `api_key`.
    pub async fn check_session_access(
        &self,
        body: &SessionAccessRequest,
    ) -> Result<SuccessResponse> {
        self.post("/api/v0/sessions/check-access", body).await
    }

    /// Report who is currently playing in each session.
    pub async fn update_sessions_players(&self, body: &SessionsPlayersRequest) -> Result<Empty> {
        self.post("/api/v0/sessions/session-players", body).await
    }

    // -- accounts -----------------------------------------------------------

    pub async fn get_profile(&self) -> Result<ProfileInfoResponse> {
        self.get("/api/v0/auth/profile").await
    }

    pub async fn login(&self, body: &LoginRequest) -> Result<SuccessResponse> {
        self.post("/api/v0/auth/login", body).await
    }

    pub async fn logout(&self) -> Result<Empty> {
        self.get("/api/v0/auth/logout").await
    }

    pub async fn register(&self, body: &RegisterRequest) -> Result<SuccessResponse> {
        self.post("/api/v0/auth/register", body).await
    }

    pub async fn change_username(&self, body: &ChangeUsernameRequest) -> Result<SuccessResponse> {
        self.post("/api/v0/auth/change-username", body).await
    }

    pub async fn change_email(&self, body: &ChangeEmailRequest) -> Result<SuccessResponse> {
        self.post("/api/v0/auth/change-email", body).await
    }

    pub async fn change_password(&self, body: &ChangePasswordRequest) -> Result<SuccessResponse> {
        self.post("/api/v0/auth/change-password", body).await
    }

    /// Replace the game auth token; read the new one with [`get_profile`](Self::get_profile).
    pub async fn regenerate_token(&self) -> Result<Empty> {
        self.get("/api/v0/auth/regenerate-token").await
    }

    // -- ghosts -------------------------------------------------------------

    /// Published ghosts of all users.
    pub async fn get_ghosts(&self) -> Result<GhostFilesResponse> {
        self.get("/api/v0/ghosts").await
    }

    /// Uploaded but unpublished ghosts of the current user.
    pub async fn get_staging_ghosts(&self) -> Result<GhostFilesResponse> {
        self.get("/api/v0/ghosts/staging").await
    }

    pub async fn get_ghosts_quota(&self) -> Result<QuotaResponse> {
        self.get("/api/v0/ghosts/quota").await
    }

    pub async fn get_ghost(&self, id: i64) -> Result<GhostFileResponse> {
        self.get(&format!("/api/v0/ghosts/{}", segment(id))).await
    }

    /// Upload ghost bundles in a single request.
    pub async fn upload_ghosts(&self, files: &[UploadFile]) -> Result<SuccessResponse> {
        self.post_files("/api/v0/ghosts", files).await
    }

    pub async fn update_ghost(&self, id: i64, body: &GhostInfoRequest) -> Result<SuccessResponse> {
        self.post(&format!("/api/v0/ghosts/{}", segment(id)), body)
            .await
    }

    pub async fn delete_ghost(&self, id: i64) -> Result<SuccessResponse> {
        self.delete(&format!("/api/v0/ghosts/{}", segment(id)))
            .await
    }

    /// Fetch a ghost bundle. `None` if the server has no data for it.
    pub async fn download_ghost(&self, id: i64) -> Result<Option<Bytes>> {
        self.get_file(&format!("/api/v0/ghosts/{}/download", segment(id)))
            .await
    }

    /// Levels that share `identifier` across game flows.
    pub async fn get_alternative_levels(&self, identifier: &str) -> Result<LevelsResponse> {
        self.get(&format!("/api/v0/levels/{}", segment(identifier)))
            .await
    }
}
