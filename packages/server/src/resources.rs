//! Every exposed resource with its collection path and the exact list of
//! fields its responses carry.

use std::collections::BTreeMap;

use serde::Serialize;

/// Bumped whenever a resource's field list changes.
pub const SCHEMA_VERSION: u32 = 1;

pub struct Resource {
    pub name: &'static str,
    /// Collection path relative to `/api/v1`.
    pub path: &'static str,
    pub fields: &'static [&'static str],
}

pub const USERS: Resource = Resource {
    name: "users",
    path: "/users",
    fields: &["id", "username", "email", "first_name", "last_name", "role", "instagram"],
};

pub const COMPETITIONS: Resource = Resource {
    name: "competitions",
    path: "/competitions",
    fields: &[
        "id",
        "title",
        "description",
        "theme",
        "startDate",
        "endDate",
        "status",
        "isPaid",
        "price",
    ],
};

pub const COMPETITION_REGISTRATIONS: Resource = Resource {
    name: "competition-registrations",
    path: "/competition-registrations",
    fields: &[
        "id",
        "competition",
        "name",
        "email",
        "college",
        "instagram",
        "submissionUrl",
        "status",
    ],
};

pub const WORKSHOPS: Resource = Resource {
    name: "workshops",
    path: "/workshops",
    fields: &[
        "id",
        "title",
        "description",
        "level",
        "startDate",
        "endDate",
        "mode",
        "venue",
        "price",
        "capacity",
    ],
};

pub const WORKSHOP_REGISTRATIONS: Resource = Resource {
    name: "workshop-registrations",
    path: "/workshop-registrations",
    fields: &["id", "workshop", "name", "email", "phone", "paymentStatus"],
};

pub const SERVICE_LEADS: Resource = Resource {
    name: "service-leads",
    path: "/service-leads",
    fields: &[
        "id",
        "name",
        "email",
        "phone",
        "projectType",
        "budgetRange",
        "eventDate",
        "details",
        "status",
    ],
};

pub const PORTFOLIO_ITEMS: Resource = Resource {
    name: "portfolio-items",
    path: "/portfolio-items",
    fields: &[
        "id",
        "type",
        "title",
        "description",
        "mediaUrl",
        "thumbnailUrl",
        "category",
        "createdBy",
    ],
};

pub const RESOURCES: &[Resource] = &[
    USERS,
    COMPETITIONS,
    COMPETITION_REGISTRATIONS,
    WORKSHOPS,
    WORKSHOP_REGISTRATIONS,
    SERVICE_LEADS,
    PORTFOLIO_ITEMS,
];

/// Body of `GET /api/v1/`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ApiRoot {
    pub schema_version: u32,
    /// Resource name to absolute collection path.
    pub resources: BTreeMap<&'static str, String>,
}

pub fn api_root(prefix: &str) -> ApiRoot {
    ApiRoot {
        schema_version: SCHEMA_VERSION,
        resources: RESOURCES
            .iter()
            .map(|r| (r.name, format!("{prefix}{}", r.path)))
            .collect(),
    }
}
