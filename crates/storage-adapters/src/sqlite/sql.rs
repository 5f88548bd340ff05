//! SQL statements for the SQLite store.

// ─── Admins ─────────────────────────────────────────────────────────────────

pub const SELECT_ADMIN_BY_EMAIL: &str =
    "SELECT id, email, password_hash, name, created_at FROM admins WHERE email = ?";

pub const INSERT_ADMIN: &str =
    "INSERT INTO admins (id, email, password_hash, name, created_at) VALUES (?, ?, ?, ?, ?)";

// ─── Personas ───────────────────────────────────────────────────────────────

pub const SELECT_PERSONAS: &str = "SELECT p.id, p.name, p.bio, p.role, p.profile_image_url, \
     p.more_info_text, p.external_links, p.display_order, p.is_active, p.created_at, \
     (SELECT COUNT(*) FROM articles a WHERE a.persona_id = p.id) AS article_count \
     FROM personas p ORDER BY p.display_order ASC, p.name ASC";

pub const SELECT_PERSONA: &str = "SELECT p.id, p.name, p.bio, p.role, p.profile_image_url, \
     p.more_info_text, p.external_links, p.display_order, p.is_active, p.created_at, \
     (SELECT COUNT(*) FROM articles a WHERE a.persona_id = p.id) AS article_count \
     FROM personas p WHERE p.id = ?";

pub const INSERT_PERSONA: &str = "INSERT INTO personas (id, name, bio, role, profile_image_url, \
     more_info_text, external_links, display_order, is_active, created_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

pub const UPDATE_PERSONA: &str = "UPDATE personas SET name = ?, bio = ?, role = ?, \
     profile_image_url = ?, more_info_text = ?, external_links = ?, display_order = ?, \
     is_active = ? WHERE id = ?";

pub const SET_PERSONA_ACTIVE: &str = "UPDATE personas SET is_active = ? WHERE id = ?";

// ─── Articles ───────────────────────────────────────────────────────────────

pub const SELECT_ARTICLES: &str = "SELECT a.id, a.title, a.body, a.excerpt, a.featured_image_url, \
     a.persona_id, p.name AS persona_name, a.category, a.tags, a.style, a.is_public, \
     a.published_at, a.created_at, a.updated_at \
     FROM articles a JOIN personas p ON p.id = a.persona_id \
     ORDER BY a.created_at DESC";

pub const SELECT_PUBLIC_ARTICLES: &str = "SELECT a.id, a.title, a.body, a.excerpt, \
     a.featured_image_url, a.persona_id, p.name AS persona_name, a.category, a.tags, a.style, \
     a.is_public, a.published_at, a.created_at, a.updated_at \
     FROM articles a JOIN personas p ON p.id = a.persona_id \
     WHERE a.is_public = 1 \
     ORDER BY a.published_at DESC, a.created_at DESC";

pub const SELECT_ARTICLE: &str = "SELECT a.id, a.title, a.body, a.excerpt, a.featured_image_url, \
     a.persona_id, p.name AS persona_name, a.category, a.tags, a.style, a.is_public, \
     a.published_at, a.created_at, a.updated_at \
     FROM articles a JOIN personas p ON p.id = a.persona_id \
     WHERE a.id = ?";

pub const INSERT_ARTICLE: &str = "INSERT INTO articles (id, title, body, excerpt, \
     featured_image_url, persona_id, category, tags, style, is_public, published_at, \
     created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

pub const UPDATE_ARTICLE: &str = "UPDATE articles SET title = ?, body = ?, excerpt = ?, \
     featured_image_url = ?, persona_id = ?, category = ?, tags = ?, style = ?, is_public = ?, \
     published_at = ?, updated_at = ? WHERE id = ?";

pub const DELETE_ARTICLE: &str = "DELETE FROM articles WHERE id = ?";

// ─── Settings ───────────────────────────────────────────────────────────────

pub const SELECT_SETTINGS: &str =
    "SELECT id, site_name, tagline, is_public FROM settings WHERE singleton = 1";

pub const INSERT_SETTINGS_IF_ABSENT: &str = "INSERT INTO settings (id, site_name, tagline, is_public) \
     VALUES (?, ?, ?, ?) ON CONFLICT(singleton) DO NOTHING";

/// Keeps the stored id when the row already exists.
pub const UPSERT_SETTINGS: &str = "INSERT INTO settings (id, site_name, tagline, is_public) \
     VALUES (?, ?, ?, ?) \
     ON CONFLICT(singleton) DO UPDATE SET site_name = excluded.site_name, \
     tagline = excluded.tagline, is_public = excluded.is_public";
