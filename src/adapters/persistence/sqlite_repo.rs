//! SQLite-backed content store via libsql. Implements ContentRepository.
//!
//! The schema mirrors the authoring tool's tables: posts and projects, the
//! shared tag vocabulary, two join tables and the ordered gallery. The schema
//! is created on connect; after that this adapter only reads.
//! All content shares one database file: data/content.db

use crate::domain::{
    Category, DomainError, PostRecord, PostStatus, ProjectImage, ProjectRecord, SeoOverrides, Tag,
    TagLink,
};
use crate::ports::ContentRepository;
use chrono::{DateTime, NaiveDateTime, Utc};
use libsql::params::IntoParams;
use libsql::{Connection, Database, Row, params};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS tags (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS blog_posts (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    excerpt TEXT,
    content TEXT,
    status TEXT NOT NULL DEFAULT 'draft',
    published_date TEXT,
    meta_title TEXT,
    meta_description TEXT,
    focus_keyword TEXT,
    category_id TEXT
);
CREATE TABLE IF NOT EXISTS post_tags (
    post_id TEXT NOT NULL,
    tag_id TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    excerpt TEXT,
    description TEXT,
    main_image_url TEXT NOT NULL DEFAULT '',
    main_image_alt TEXT,
    link TEXT,
    github_link TEXT,
    video_url TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS project_tags (
    project_id TEXT NOT NULL,
    tag_id TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS project_images (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    image_url TEXT NOT NULL,
    image_alt TEXT,
    display_order INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_posts_status_date ON blog_posts (status, published_date DESC);
CREATE INDEX IF NOT EXISTS idx_projects_created ON projects (created_at DESC);
"#;

const POST_COLUMNS: &str = r#"
    p.id, p.title, p.slug, p.excerpt, p.content, p.status, p.published_date,
    p.meta_title, p.meta_description, p.focus_keyword,
    c.id, c.name, c.slug
"#;

const PROJECT_COLUMNS: &str = r#"
    id, title, slug, excerpt, description, main_image_url, main_image_alt,
    link, github_link, video_url, created_at
"#;

fn repo_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Repo(e.to_string())
}

/// Accepts RFC 3339 and SQLite's `CURRENT_TIMESTAMP` form (UTC implied).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
        .ok()
}

/// Newest publication first, undated posts ahead of every dated one. Dates are
/// compared as instants so mixed timestamp forms and offsets order correctly;
/// equal instants keep insertion order.
const POST_ORDER: &str = "p.published_date IS NULL DESC, julianday(p.published_date) DESC, p.rowid";
const PROJECT_ORDER: &str = "julianday(created_at) DESC, rowid";

/// SQLite treats a negative LIMIT as "no limit".
fn sql_limit(limit: Option<usize>) -> i64 {
    limit.map(|n| n as i64).unwrap_or(-1)
}

fn opt_text(row: &Row, idx: i32) -> Option<String> {
    row.get::<String>(idx).ok()
}

/// SQLite content repository. One database file in the given base directory.
pub struct SqliteRepo {
    db: Database,
    db_path: PathBuf,
}

impl SqliteRepo {
    /// Connect to (or create) the database and ensure the schema exists.
    /// Call once at startup; the returned repo is safe to share via Arc.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(repo_err)?;
        let db_path = base.join("content.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err)?;
        let conn = db.connect().map_err(repo_err)?;

        // WAL lets the authoring tool write while pages are being built.
        // PRAGMA returns a row; consume it (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(repo_err)?.is_some() {}

        conn.execute_batch(SCHEMA).await.map_err(repo_err)?;

        info!(path = %db_path.display(), "SQLite content store connected");

        Ok(Self { db, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn conn(&self) -> Result<Connection, DomainError> {
        self.db.connect().map_err(repo_err)
    }

    /// Load tag links keyed by owner id. `sql` must select
    /// `(owner_id, tag.id, tag.name, tag.slug)` in join-table order; the tag
    /// columns are NULL for dangling links.
    async fn tag_links(
        conn: &Connection,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<HashMap<String, Vec<TagLink>>, DomainError> {
        let mut rows = conn.query(sql, params).await.map_err(repo_err)?;
        let mut links: HashMap<String, Vec<TagLink>> = HashMap::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            let owner: String = row.get(0).map_err(repo_err)?;
            let tag = match (opt_text(&row, 1), opt_text(&row, 2), opt_text(&row, 3)) {
                (Some(id), Some(name), Some(slug)) => Some(Tag { id, name, slug }),
                _ => None,
            };
            links.entry(owner).or_default().push(TagLink { tag });
        }
        Ok(links)
    }

    async fn project_images(
        conn: &Connection,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<HashMap<String, Vec<ProjectImage>>, DomainError> {
        let mut rows = conn.query(sql, params).await.map_err(repo_err)?;
        let mut images: HashMap<String, Vec<ProjectImage>> = HashMap::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            let image = ProjectImage {
                id: row.get(0).map_err(repo_err)?,
                project_id: row.get(1).map_err(repo_err)?,
                image_url: row.get(2).map_err(repo_err)?,
                image_alt: opt_text(&row, 3),
                display_order: row.get::<i32>(4).unwrap_or(0),
            };
            images
                .entry(image.project_id.clone())
                .or_default()
                .push(image);
        }
        Ok(images)
    }

    fn post_from_row(row: &Row) -> Result<PostRecord, DomainError> {
        let published_raw = opt_text(row, 6);
        let published_date = published_raw.as_deref().and_then(parse_timestamp);
        if published_raw.is_some() && published_date.is_none() {
            debug!(raw = ?published_raw, "unparseable published_date, treating as unset");
        }
        let category = match (opt_text(row, 10), opt_text(row, 11), opt_text(row, 12)) {
            (Some(id), Some(name), Some(slug)) => Some(Category { id, name, slug }),
            _ => None,
        };
        Ok(PostRecord {
            id: row.get(0).map_err(repo_err)?,
            title: row.get(1).map_err(repo_err)?,
            slug: row.get(2).map_err(repo_err)?,
            excerpt: opt_text(row, 3),
            content: opt_text(row, 4),
            status: PostStatus::from_db(&row.get::<String>(5).unwrap_or_default()),
            published_date,
            seo: SeoOverrides {
                meta_title: opt_text(row, 7),
                meta_description: opt_text(row, 8),
                focus_keyword: opt_text(row, 9),
            },
            category,
            post_tags: Vec::new(),
        })
    }

    fn project_from_row(row: &Row) -> Result<ProjectRecord, DomainError> {
        let created_raw: String = row.get(10).map_err(repo_err)?;
        let created_at = parse_timestamp(&created_raw)
            .ok_or_else(|| DomainError::Repo(format!("invalid created_at: {}", created_raw)))?;
        Ok(ProjectRecord {
            id: row.get(0).map_err(repo_err)?,
            title: row.get(1).map_err(repo_err)?,
            slug: row.get(2).map_err(repo_err)?,
            excerpt: opt_text(row, 3),
            description: opt_text(row, 4),
            main_image_url: row.get::<String>(5).unwrap_or_default(),
            main_image_alt: opt_text(row, 6),
            link: opt_text(row, 7),
            github_link: opt_text(row, 8),
            video_url: opt_text(row, 9),
            created_at,
            project_tags: Vec::new(),
            project_images: Vec::new(),
        })
    }

    async fn collect_posts(
        conn: &Connection,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Vec<PostRecord>, DomainError> {
        let mut rows = conn.query(sql, params).await.map_err(repo_err)?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            posts.push(Self::post_from_row(&row)?);
        }
        Ok(posts)
    }

    async fn collect_projects(
        conn: &Connection,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<Vec<ProjectRecord>, DomainError> {
        let mut rows = conn.query(sql, params).await.map_err(repo_err)?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            projects.push(Self::project_from_row(&row)?);
        }
        Ok(projects)
    }

    async fn collect_slugs(&self, sql: &str) -> Result<Vec<String>, DomainError> {
        let conn = self.conn()?;
        let mut rows = conn.query(sql, ()).await.map_err(repo_err)?;
        let mut slugs = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            slugs.push(row.get::<String>(0).map_err(repo_err)?);
        }
        Ok(slugs)
    }

    #[cfg(test)]
    pub(crate) async fn execute_batch(&self, sql: &str) -> Result<(), DomainError> {
        self.conn()?
            .execute_batch(sql)
            .await
            .map(|_| ())
            .map_err(repo_err)
    }
}

#[async_trait::async_trait]
impl ContentRepository for SqliteRepo {
    async fn list_published_posts(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<PostRecord>, DomainError> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM blog_posts p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.status = 'published'
            ORDER BY {POST_ORDER}
            LIMIT ?1
            "#
        );
        let mut posts = Self::collect_posts(&conn, &sql, params![sql_limit(limit)]).await?;
        let mut links = Self::tag_links(
            &conn,
            r#"
            SELECT pt.post_id, t.id, t.name, t.slug
            FROM post_tags pt
            JOIN blog_posts p ON p.id = pt.post_id AND p.status = 'published'
            LEFT JOIN tags t ON t.id = pt.tag_id
            ORDER BY pt.rowid
            "#,
            (),
        )
        .await?;
        for post in &mut posts {
            post.post_tags = links.remove(&post.id).unwrap_or_default();
        }
        Ok(posts)
    }

    async fn get_published_post(&self, slug: &str) -> Result<Option<PostRecord>, DomainError> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {POST_COLUMNS}
            FROM blog_posts p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.slug = ?1 AND p.status = 'published'
            LIMIT 1
            "#
        );
        let Some(mut post) = Self::collect_posts(&conn, &sql, params![slug])
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        let mut links = Self::tag_links(
            &conn,
            r#"
            SELECT pt.post_id, t.id, t.name, t.slug
            FROM post_tags pt
            LEFT JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ?1
            ORDER BY pt.rowid
            "#,
            params![post.id.as_str()],
        )
        .await?;
        post.post_tags = links.remove(&post.id).unwrap_or_default();
        Ok(Some(post))
    }

    async fn list_projects(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ProjectRecord>, DomainError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY {PROJECT_ORDER} LIMIT ?1"
        );
        let mut projects = Self::collect_projects(&conn, &sql, params![sql_limit(limit)]).await?;
        let mut links = Self::tag_links(
            &conn,
            r#"
            SELECT pt.project_id, t.id, t.name, t.slug
            FROM project_tags pt
            LEFT JOIN tags t ON t.id = pt.tag_id
            ORDER BY pt.rowid
            "#,
            (),
        )
        .await?;
        let mut images = Self::project_images(
            &conn,
            r#"
            SELECT id, project_id, image_url, image_alt, display_order
            FROM project_images
            ORDER BY rowid
            "#,
            (),
        )
        .await?;
        for project in &mut projects {
            project.project_tags = links.remove(&project.id).unwrap_or_default();
            project.project_images = images.remove(&project.id).unwrap_or_default();
        }
        Ok(projects)
    }

    async fn get_project(&self, slug: &str) -> Result<Option<ProjectRecord>, DomainError> {
        let conn = self.conn()?;
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = ?1 LIMIT 1");
        let Some(mut project) = Self::collect_projects(&conn, &sql, params![slug])
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        let mut links = Self::tag_links(
            &conn,
            r#"
            SELECT pt.project_id, t.id, t.name, t.slug
            FROM project_tags pt
            LEFT JOIN tags t ON t.id = pt.tag_id
            WHERE pt.project_id = ?1
            ORDER BY pt.rowid
            "#,
            params![project.id.as_str()],
        )
        .await?;
        let mut images = Self::project_images(
            &conn,
            r#"
            SELECT id, project_id, image_url, image_alt, display_order
            FROM project_images
            WHERE project_id = ?1
            ORDER BY rowid
            "#,
            params![project.id.as_str()],
        )
        .await?;
        project.project_tags = links.remove(&project.id).unwrap_or_default();
        project.project_images = images.remove(&project.id).unwrap_or_default();
        Ok(Some(project))
    }

    async fn list_published_slugs(&self) -> Result<Vec<String>, DomainError> {
        let sql = format!(
            "SELECT p.slug FROM blog_posts p WHERE p.status = 'published' ORDER BY {POST_ORDER}"
        );
        self.collect_slugs(&sql).await
    }

    async fn list_project_slugs(&self) -> Result<Vec<String>, DomainError> {
        let sql = format!("SELECT slug FROM projects ORDER BY {PROJECT_ORDER}");
        self.collect_slugs(&sql).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
    INSERT INTO categories (id, name, slug) VALUES ('c1', 'Rust', 'rust');
    INSERT INTO tags (id, name, slug) VALUES ('t1', 'async', 'async'), ('t2', 'web', 'web');
    INSERT INTO blog_posts (id, title, slug, excerpt, content, status, published_date, meta_title, category_id)
    VALUES
        ('p1', 'Older', 'older', 'old ex', '<p>old</p>', 'published', '2023-04-01T09:00:00Z', NULL, NULL),
        ('p2', 'Newer', 'newer', 'new ex', '<p>new</p>', 'published', '2024-04-01T09:00:00Z', 'Newer!', 'c1'),
        ('p3', 'Hidden', 'hidden', NULL, NULL, 'draft', NULL, NULL, 'c1');
    INSERT INTO post_tags (post_id, tag_id) VALUES ('p2', 't2'), ('p2', 'gone'), ('p2', 't1'), ('p1', 't1');
    INSERT INTO projects (id, title, slug, excerpt, main_image_url, created_at)
    VALUES
        ('j1', 'Chat App', 'chat-app', 'chat', 'chat.png', '2023-01-01 10:00:00'),
        ('j2', 'Site', 'site', NULL, 'site.png', '2024-01-01T10:00:00Z');
    INSERT INTO project_tags (project_id, tag_id) VALUES ('j1', 't2');
    INSERT INTO project_images (id, project_id, image_url, image_alt, display_order)
    VALUES ('i1', 'j1', 'a.png', NULL, 2), ('i2', 'j1', 'b.png', 'B', 0);
    "#;

    async fn seeded() -> (tempfile::TempDir, SqliteRepo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        repo.execute_batch(FIXTURE).await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn test_published_posts_newest_first_with_relations() {
        let (_dir, repo) = seeded().await;
        let posts = repo.list_published_posts(None).await.unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);

        let newer = &posts[0];
        assert_eq!(newer.category.as_ref().map(|c| c.name.as_str()), Some("Rust"));
        assert_eq!(newer.seo.meta_title.as_deref(), Some("Newer!"));
        // Dangling link is kept as an empty wrapper, in join order.
        assert_eq!(newer.post_tags.len(), 3);
        assert!(newer.post_tags[1].tag.is_none());
        assert!(posts[1].category.is_none());
    }

    #[tokio::test]
    async fn test_draft_is_invisible() {
        let (_dir, repo) = seeded().await;
        assert!(repo.get_published_post("hidden").await.unwrap().is_none());
        assert_eq!(
            repo.list_published_slugs().await.unwrap(),
            vec!["newer", "older"]
        );
        assert_eq!(repo.list_published_posts(Some(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_project_with_tags_and_images() {
        let (_dir, repo) = seeded().await;
        let project = repo.get_project("chat-app").await.unwrap().unwrap();
        assert_eq!(project.project_tags.len(), 1);
        let ids: Vec<_> = project.project_images.iter().map(|i| i.id.as_str()).collect();
        // Fetch order, not display order.
        assert_eq!(ids, vec!["i1", "i2"]);
        assert_eq!(
            repo.list_project_slugs().await.unwrap(),
            vec!["site", "chat-app"]
        );
        assert!(repo.get_project("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mixed_timestamp_forms_order_by_instant() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        repo.execute_batch(
            r#"
            INSERT INTO blog_posts (id, title, slug, status, published_date) VALUES
                ('a', 'Early', 'early', 'published', '2024-01-05T01:00:00Z'),
                ('b', 'Late', 'late', 'published', '2024-01-05 23:00:00'),
                ('c', 'Offset', 'offset', 'published', '2024-01-06T03:00:00+05:00'),
                ('d', 'Undated', 'undated', 'published', NULL);
            INSERT INTO projects (id, title, slug, main_image_url, created_at) VALUES
                ('j1', 'Plain', 'plain', 'p.png', '2024-03-01 12:00:00'),
                ('j2', 'Zulu', 'zulu', 'z.png', '2024-03-01T08:00:00Z');
            "#,
        )
        .await
        .unwrap();

        // 22:00Z for the offset row sits between the other two.
        let expected = vec!["undated", "late", "offset", "early"];
        assert_eq!(repo.list_published_slugs().await.unwrap(), expected);
        let listed = repo.list_published_posts(None).await.unwrap();
        let slugs: Vec<_> = listed.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, expected);

        assert_eq!(repo.list_project_slugs().await.unwrap(), vec!["plain", "zulu"]);
        let projects = repo.list_projects(Some(1)).await.unwrap();
        assert_eq!(projects[0].slug, "plain");
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert!(parse_timestamp("2024-01-05T10:00:00Z").is_some());
        assert!(parse_timestamp("2024-01-05T10:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-05 10:00:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
