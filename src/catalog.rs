//! Static endpoint catalog
//!
//! The documented backend surface, declared as a flat table of descriptors
//! and grouped for display by role section, then by category derived from
//! the path. Collapse state for the rendered tree lives in a set of string
//! keys: "<role>" for a whole section, "<role>.<category>" for one group.

use crate::auth::Role;
use crate::types::{ApiEndpoint, RenderItem, ResponseKind};
use serde_json::json;
use std::collections::HashSet;

fn admin(method: &str, path: &str, name: &str, description: &str) -> ApiEndpoint {
    ApiEndpoint::new(Role::Admin, method, path, name, description)
}

fn user(method: &str, path: &str, name: &str, description: &str) -> ApiEndpoint {
    ApiEndpoint::new(Role::User, method, path, name, description)
}

/// Build the full endpoint table. Called once at startup; the returned
/// descriptors are immutable from then on.
pub fn build_catalog() -> Vec<ApiEndpoint> {
    vec![
        // Admin section
        admin(
            "POST",
            "/api/admin/login",
            "Admin Login",
            "Log in as administrator and obtain a token",
        )
        .body(json!({"email": "admin@example.com", "password": "admin123"}))
        .kind(ResponseKind::AdminLogin),
        admin(
            "GET",
            "/api/admin/profile",
            "Admin Profile",
            "Fetch the current administrator's profile",
        )
        .auth(Role::Admin),
        admin("GET", "/api/admin/users", "List Users", "Fetch all registered users")
            .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/dashboard/stats",
            "Dashboard Stats",
            "Fetch system statistics",
        )
        .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/dashboard/system",
            "System Info",
            "Fetch system information",
        )
        .auth(Role::Admin),
        admin("GET", "/api/admin/jobs", "List Jobs", "Fetch all generation jobs")
            .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/llm/config",
            "LLM Config",
            "Fetch LLM configuration status",
        )
        .auth(Role::Admin),
        admin(
            "POST",
            "/api/admin/llm/test",
            "Test LLM Connection",
            "Test the LLM API connection",
        )
        .auth(Role::Admin),
        admin(
            "POST",
            "/api/admin/llm/simple",
            "Simple Generation",
            "Run a simple code generation prompt",
        )
        .auth(Role::Admin)
        .body(json!({"prompt": "Create a Go struct for a User with ID, Name, Email fields"})),
        admin(
            "GET",
            "/api/admin/permissions",
            "List Permissions",
            "Fetch the system permission list",
        )
        .auth(Role::Admin),
        admin(
            "POST",
            "/api/admin/permissions",
            "Create Permission",
            "Create a new permission",
        )
        .auth(Role::Admin)
        .body(json!({
            "name": "test.permission",
            "description": "Test permission",
            "resource": "test",
            "action": "read"
        })),
        admin(
            "GET",
            "/api/admin/permissions/users/1",
            "User Permissions",
            "Fetch permissions for a given user",
        )
        .auth(Role::Admin),
        admin(
            "POST",
            "/api/admin/permissions/initialize",
            "Initialize Permissions",
            "Seed the default permission set",
        )
        .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/permissions/stats",
            "Permission Stats",
            "Fetch permission usage statistics",
        )
        .auth(Role::Admin),
        admin("POST", "/api/admin/export", "Export Users", "Export user data")
            .auth(Role::Admin)
            .body(json!({"data_type": "users", "format": "json"})),
        admin(
            "GET",
            "/api/admin/export/system-report",
            "System Report",
            "Export a system statistics report",
        )
        .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/export/types",
            "Export Types",
            "Fetch the supported export types",
        )
        .auth(Role::Admin),
        admin(
            "POST",
            "/api/admin/export/cleanup",
            "Cleanup Exports",
            "Remove expired export files",
        )
        .auth(Role::Admin),
        admin(
            "POST",
            "/api/admin/jobs/sample",
            "Create Sample Job",
            "Create a sample generation job",
        )
        .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/jobs/1",
            "Job Detail",
            "Fetch details for a given job",
        )
        .auth(Role::Admin),
        admin("PUT", "/api/admin/jobs/1", "Update Job", "Update a given job")
            .auth(Role::Admin)
            .body(json!({"status": "completed", "output_data": "Generated code here"})),
        admin("DELETE", "/api/admin/jobs/1", "Delete Job", "Delete a given job")
            .auth(Role::Admin),
        admin(
            "GET",
            "/api/admin/users/1",
            "User Detail",
            "Fetch details for a given user",
        )
        .auth(Role::Admin),
        admin("DELETE", "/api/admin/users/1", "Delete User", "Delete a given user")
            .auth(Role::Admin),
        // User section
        user(
            "POST",
            "/api/vf/v1/auth/register",
            "Register",
            "Register a new user account",
        )
        .body(json!({
            "username": "testuser",
            "email": "testuser@example.com",
            "password": "password123"
        })),
        user(
            "POST",
            "/api/vf/v1/auth/login",
            "User Login",
            "Log in as a user and obtain a token",
        )
        .body(json!({"email": "testuser@example.com", "password": "password123"}))
        .kind(ResponseKind::UserLogin),
        user(
            "POST",
            "/api/vf/v1/auth/refresh",
            "Refresh Token",
            "Exchange a refresh token for a new access token",
        )
        .body(json!({"refresh_token": "your-refresh-token-here"})),
        user("POST", "/api/vf/v1/auth/logout", "Logout", "Log the current user out")
            .auth(Role::User),
        user(
            "GET",
            "/api/vf/v1/profile",
            "Get Profile",
            "Fetch the current user's profile",
        )
        .auth(Role::User),
        user(
            "PUT",
            "/api/vf/v1/profile",
            "Update Profile",
            "Update the current user's profile",
        )
        .auth(Role::User)
        .body(json!({
            "display_name": "Test User",
            "bio": "This is a test user",
            "location": "Test City",
            "website": "https://example.com"
        })),
        user(
            "GET",
            "/api/vf/v1/users/1/profile",
            "Public Profile",
            "View another user's public profile",
        )
        .auth(Role::User),
        user("GET", "/api/vf/v1/ping", "Ping", "Check user API connectivity"),
        user(
            "POST",
            "/api/vf/v1/files/upload",
            "Upload File",
            "Upload a file (multipart form data)",
        )
        .auth(Role::User)
        .body(json!({"category": "general"}))
        .upload(),
        user(
            "POST",
            "/api/vf/v1/files/avatar",
            "Upload Avatar",
            "Upload a user avatar (multipart form data)",
        )
        .auth(Role::User)
        .upload(),
        user(
            "GET",
            "/api/vf/v1/files",
            "List Files",
            "Fetch the current user's files",
        )
        .auth(Role::User),
        user(
            "GET",
            "/api/vf/v1/files/stats",
            "File Stats",
            "Fetch the current user's file statistics",
        )
        .auth(Role::User),
        user("DELETE", "/api/vf/v1/files/1", "Delete File", "Delete a given file")
            .auth(Role::User),
        user(
            "POST",
            "/api/vf/v1/email/send-verification",
            "Send Verification",
            "Send an email verification message",
        )
        .auth(Role::User)
        .body(json!({"email": "test@example.com"})),
        user(
            "GET",
            "/api/vf/v1/email/status?email=test@example.com",
            "Email Status",
            "Check email verification status",
        )
        .auth(Role::User),
        user(
            "GET",
            "/api/vf/v1/email/logs",
            "Email Logs",
            "Fetch the current user's email delivery log",
        )
        .auth(Role::User),
        user(
            "GET",
            "/api/vf/v1/email/verify?token=example-token",
            "Verify Email",
            "Verify an email address with a token",
        ),
        user(
            "POST",
            "/api/vf/v1/email/request-reset",
            "Request Reset",
            "Request a password reset email",
        )
        .body(json!({"email": "test@example.com"})),
        user(
            "POST",
            "/api/vf/v1/email/reset-password",
            "Reset Password",
            "Reset the password with a token",
        )
        .body(json!({"token": "reset-token-here", "new_password": "newpassword123"})),
    ]
}

/// Derive the display category from a path. Checks run in a fixed order so
/// paths matching several segments land in one stable group (e.g.
/// /api/admin/permissions/users/1 is "permissions", not "users").
pub fn category_for_path(path: &str) -> &'static str {
    if path.contains("/auth") || path.contains("/login") {
        "auth"
    } else if path.contains("/files") {
        "files"
    } else if path.contains("/email") {
        "email"
    } else if path.contains("/permissions") {
        "permissions"
    } else if path.contains("/export") {
        "export"
    } else if path.contains("/jobs") {
        "jobs"
    } else if path.contains("/users") {
        "users"
    } else if path.contains("/dashboard") {
        "dashboard"
    } else if path.contains("/llm") {
        "llm"
    } else if path.contains("/profile") {
        "profile"
    } else {
        "general"
    }
}

pub fn role_key(role: Role) -> String {
    role.label().to_string()
}

pub fn category_key(role: Role, category: &str) -> String {
    format!("{}.{}", role.label(), category)
}

/// Filter by case-insensitive substring over name, path and description.
/// An empty query returns the whole catalog.
pub fn filter_catalog(catalog: &[ApiEndpoint], query: &str) -> Vec<ApiEndpoint> {
    if query.is_empty() {
        return catalog.to_vec();
    }

    let query = query.to_lowercase();
    catalog
        .iter()
        .filter(|e| {
            e.name.to_lowercase().contains(&query)
                || e.path.to_lowercase().contains(&query)
                || e.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// The login entry for a role, used by the quick-login keys.
pub fn find_login(catalog: &[ApiEndpoint], role: Role) -> Option<&ApiEndpoint> {
    let wanted = match role {
        Role::Admin => ResponseKind::AdminLogin,
        Role::User => ResponseKind::UserLogin,
    };
    catalog.iter().find(|e| e.response_kind == wanted)
}

/// Group one role section by category, preserving first-occurrence order.
fn group_by_category<'a>(endpoints: &[&'a ApiEndpoint]) -> Vec<(&'static str, Vec<&'a ApiEndpoint>)> {
    let mut groups: Vec<(&'static str, Vec<&'a ApiEndpoint>)> = Vec::new();
    for &endpoint in endpoints {
        let category = category_for_path(&endpoint.path);
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, members)) => members.push(endpoint),
            None => groups.push((category, vec![endpoint])),
        }
    }
    groups
}

/// Flatten the (possibly filtered) catalog into list rows, honoring the
/// collapse set. Collapsing a role hides its categories and endpoints;
/// collapsing a category hides only its endpoints. Empty sections and
/// groups (after filtering) produce no header.
pub fn flatten_catalog(endpoints: &[ApiEndpoint], collapsed: &HashSet<String>) -> Vec<RenderItem> {
    let mut items = Vec::new();

    for role in Role::ALL {
        let section: Vec<&ApiEndpoint> = endpoints.iter().filter(|e| e.role == role).collect();
        if section.is_empty() {
            continue;
        }

        let role_collapsed = collapsed.contains(&role_key(role));
        items.push(RenderItem::RoleHeader {
            role,
            count: section.len(),
            collapsed: role_collapsed,
        });
        if role_collapsed {
            continue;
        }

        for (category, members) in group_by_category(&section) {
            let category_collapsed = collapsed.contains(&category_key(role, category));
            items.push(RenderItem::CategoryHeader {
                role,
                name: category.to_string(),
                count: members.len(),
                collapsed: category_collapsed,
            });
            if category_collapsed {
                continue;
            }

            for endpoint in members {
                items.push(RenderItem::Endpoint {
                    endpoint: (*endpoint).clone(),
                });
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_sections() {
        let catalog = build_catalog();
        assert_eq!(catalog.len(), 43);
        assert_eq!(catalog.iter().filter(|e| e.role == Role::Admin).count(), 24);
        assert_eq!(catalog.iter().filter(|e| e.role == Role::User).count(), 19);
    }

    #[test]
    fn test_method_path_pairs_are_unique() {
        let catalog = build_catalog();
        let mut seen = HashSet::new();
        for endpoint in &catalog {
            assert!(
                seen.insert((endpoint.method.clone(), endpoint.path.clone())),
                "duplicate entry: {} {}",
                endpoint.method,
                endpoint.path
            );
        }
    }

    #[test]
    fn test_methods_are_known() {
        for endpoint in build_catalog() {
            assert!(
                matches!(endpoint.method.as_str(), "GET" | "POST" | "PUT" | "DELETE"),
                "unexpected method {} on {}",
                endpoint.method,
                endpoint.path
            );
        }
    }

    #[test]
    fn test_auth_role_matches_section() {
        for endpoint in build_catalog() {
            if let Some(role) = endpoint.auth_role {
                assert_eq!(
                    role, endpoint.role,
                    "{} authenticates outside its section",
                    endpoint.path
                );
            }
        }
    }

    #[test]
    fn test_section_path_prefixes() {
        for endpoint in build_catalog() {
            match endpoint.role {
                Role::Admin => assert!(endpoint.path.starts_with("/api/admin")),
                Role::User => assert!(endpoint.path.starts_with("/api/vf/v1")),
            }
        }
    }

    #[test]
    fn test_exactly_two_login_entries() {
        let catalog = build_catalog();

        let admin_logins: Vec<_> = catalog
            .iter()
            .filter(|e| e.response_kind == ResponseKind::AdminLogin)
            .collect();
        assert_eq!(admin_logins.len(), 1);
        assert_eq!(admin_logins[0].path, "/api/admin/login");
        assert!(!admin_logins[0].requires_auth());

        let user_logins: Vec<_> = catalog
            .iter()
            .filter(|e| e.response_kind == ResponseKind::UserLogin)
            .collect();
        assert_eq!(user_logins.len(), 1);
        assert_eq!(user_logins[0].path, "/api/vf/v1/auth/login");
        assert!(!user_logins[0].requires_auth());
    }

    #[test]
    fn test_sample_bodies_only_on_body_methods() {
        for endpoint in build_catalog() {
            if endpoint.sample_body.is_some() {
                assert!(
                    endpoint.supports_body(),
                    "{} {} carries a body it could never send",
                    endpoint.method,
                    endpoint.path
                );
            }
        }
    }

    #[test]
    fn test_upload_entries_are_flagged() {
        let catalog = build_catalog();
        let uploads: Vec<_> = catalog.iter().filter(|e| e.file_upload).collect();
        assert_eq!(uploads.len(), 2);
        assert!(uploads.iter().all(|e| e.path.contains("/files")));
    }

    #[test]
    fn test_category_for_path() {
        assert_eq!(category_for_path("/api/admin/login"), "auth");
        assert_eq!(category_for_path("/api/vf/v1/auth/register"), "auth");
        assert_eq!(category_for_path("/api/admin/permissions/users/1"), "permissions");
        assert_eq!(category_for_path("/api/vf/v1/users/1/profile"), "users");
        assert_eq!(category_for_path("/api/admin/dashboard/stats"), "dashboard");
        assert_eq!(category_for_path("/api/admin/llm/simple"), "llm");
        assert_eq!(category_for_path("/api/admin/profile"), "profile");
        assert_eq!(category_for_path("/api/vf/v1/ping"), "general");
        assert_eq!(category_for_path("/api/vf/v1/email/status?email=x"), "email");
    }

    #[test]
    fn test_collapse_key_format() {
        assert_eq!(role_key(Role::Admin), "admin");
        assert_eq!(category_key(Role::User, "files"), "user.files");
    }

    #[test]
    fn test_filter_is_case_insensitive_over_all_fields() {
        let catalog = build_catalog();

        let by_name = filter_catalog(&catalog, "llm");
        assert_eq!(by_name.len(), 3);

        let by_path = filter_catalog(&catalog, "/EXPORT");
        assert_eq!(by_path.len(), 4);

        let by_description = filter_catalog(&catalog, "multipart");
        assert_eq!(by_description.len(), 2);

        assert_eq!(filter_catalog(&catalog, "").len(), catalog.len());
        assert!(filter_catalog(&catalog, "no-such-endpoint").is_empty());
    }

    #[test]
    fn test_find_login_per_role() {
        let catalog = build_catalog();
        assert_eq!(
            find_login(&catalog, Role::Admin).map(|e| e.path.as_str()),
            Some("/api/admin/login")
        );
        assert_eq!(
            find_login(&catalog, Role::User).map(|e| e.path.as_str()),
            Some("/api/vf/v1/auth/login")
        );
    }

    #[test]
    fn test_flatten_counts_without_collapse() {
        let catalog = build_catalog();
        let items = flatten_catalog(&catalog, &HashSet::new());

        let role_headers = items
            .iter()
            .filter(|i| matches!(i, RenderItem::RoleHeader { .. }))
            .count();
        let category_headers = items
            .iter()
            .filter(|i| matches!(i, RenderItem::CategoryHeader { .. }))
            .count();
        let endpoints = items
            .iter()
            .filter(|i| matches!(i, RenderItem::Endpoint { .. }))
            .count();

        assert_eq!(role_headers, 2);
        assert_eq!(category_headers, 14);
        assert_eq!(endpoints, 43);
    }

    #[test]
    fn test_flatten_collapsed_role_hides_everything_below() {
        let catalog = build_catalog();
        let mut collapsed = HashSet::new();
        collapsed.insert(role_key(Role::Admin));

        let items = flatten_catalog(&catalog, &collapsed);

        // Collapsed admin header, then the full user section.
        match &items[0] {
            RenderItem::RoleHeader { role, count, collapsed } => {
                assert_eq!(*role, Role::Admin);
                assert_eq!(*count, 24);
                assert!(*collapsed);
            }
            other => panic!("expected role header, got {:?}", other),
        }

        let endpoints = items
            .iter()
            .filter(|i| matches!(i, RenderItem::Endpoint { .. }))
            .count();
        assert_eq!(endpoints, 19);
    }

    #[test]
    fn test_flatten_collapsed_category_hides_only_its_endpoints() {
        let catalog = build_catalog();
        let mut collapsed = HashSet::new();
        collapsed.insert(category_key(Role::User, "files"));

        let items = flatten_catalog(&catalog, &collapsed);

        let endpoints = items
            .iter()
            .filter(|i| matches!(i, RenderItem::Endpoint { .. }))
            .count();
        assert_eq!(endpoints, 43 - 5);

        let files_header = items.iter().any(|i| {
            matches!(
                i,
                RenderItem::CategoryHeader { role: Role::User, name, collapsed: true, .. }
                if name == "files"
            )
        });
        assert!(files_header);
    }

    #[test]
    fn test_flatten_drops_empty_groups_when_filtered() {
        let catalog = build_catalog();
        let filtered = filter_catalog(&catalog, "llm");
        let items = flatten_catalog(&filtered, &HashSet::new());

        // One role header (admin), one category header (llm), three endpoints.
        assert_eq!(items.len(), 5);
        assert!(matches!(
            &items[0],
            RenderItem::RoleHeader { role: Role::Admin, count: 3, .. }
        ));
        assert!(matches!(
            &items[1],
            RenderItem::CategoryHeader { name, count: 3, .. } if name == "llm"
        ));
    }
}
