// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use url::Url;

use crate::utils::AppendPathSegments;

/// The kinds of resources addressed by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Databases,
    Containers,
    Items,
    StoredProcedures,
    Triggers,
    UserDefinedFunctions,
    Offers,
}

impl ResourceType {
    /// The path segment for this resource type, which is also the value signed into the authorization header.
    pub fn path_segment(self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Containers => "colls",
            ResourceType::Items => "docs",
            ResourceType::StoredProcedures => "sprocs",
            ResourceType::Triggers => "triggers",
            ResourceType::UserDefinedFunctions => "udfs",
            ResourceType::Offers => "offers",
        }
    }
}

/// Identifies either a feed of resources (`dbs/mydb/colls`) or a single resource (`dbs/mydb/colls/mystore`).
///
/// The REST API signs feeds with the link of their *parent* and single resources with their own link,
/// so both forms are tracked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    parent: Vec<String>,
    resource_type: ResourceType,
    item_id: Option<String>,
}

impl ResourceLink {
    /// A feed at the root of the account, such as `dbs` or `offers`.
    pub fn root(resource_type: ResourceType) -> Self {
        Self {
            parent: Vec::new(),
            resource_type,
            item_id: None,
        }
    }

    /// The single resource with the given id inside this feed.
    pub fn item(&self, id: impl Into<String>) -> Self {
        Self {
            parent: self.parent.clone(),
            resource_type: self.resource_type,
            item_id: Some(id.into()),
        }
    }

    /// A child feed of this resource, such as the containers of a database.
    pub fn feed(&self, resource_type: ResourceType) -> Self {
        Self {
            parent: self.segments(),
            resource_type,
            item_id: None,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    /// The path of this resource relative to the account endpoint.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }

    /// The resource link used when signing requests for this resource.
    pub fn link_for_signing(&self) -> String {
        match self.item_id {
            Some(_) => self.path(),
            None => self.parent.join("/"),
        }
    }

    /// Resolves this link against an account endpoint.
    pub fn url(&self, endpoint: &Url) -> Url {
        endpoint.with_path_segments(self.segments())
    }

    fn segments(&self) -> Vec<String> {
        let mut segments = self.parent.clone();
        segments.push(self.resource_type.path_segment().to_string());
        if let Some(id) = &self.item_id {
            segments.push(id.clone());
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_link() -> ResourceLink {
        ResourceLink::root(ResourceType::Databases)
            .item("mydb")
            .feed(ResourceType::Containers)
            .item("mystore")
    }

    #[test]
    fn database_feed_is_signed_with_empty_link() {
        let link = ResourceLink::root(ResourceType::Databases);
        assert_eq!(link.path(), "dbs");
        assert_eq!(link.link_for_signing(), "");
    }

    #[test]
    fn database_is_signed_with_own_link() {
        let link = ResourceLink::root(ResourceType::Databases).item("mydb");
        assert_eq!(link.path(), "dbs/mydb");
        assert_eq!(link.link_for_signing(), "dbs/mydb");
        assert_eq!(link.item_id(), Some("mydb"));
    }

    #[test]
    fn item_feed_is_signed_with_container_link() {
        let link = container_link().feed(ResourceType::Items);
        assert_eq!(link.path(), "dbs/mydb/colls/mystore/docs");
        assert_eq!(link.link_for_signing(), "dbs/mydb/colls/mystore");
        assert_eq!(link.resource_type(), ResourceType::Items);
    }

    #[test]
    fn script_links() {
        let sproc = container_link()
            .feed(ResourceType::StoredProcedures)
            .item("spHelloWorld");
        assert_eq!(sproc.path(), "dbs/mydb/colls/mystore/sprocs/spHelloWorld");
        assert_eq!(
            sproc.link_for_signing(),
            "dbs/mydb/colls/mystore/sprocs/spHelloWorld"
        );

        let triggers = container_link().feed(ResourceType::Triggers);
        assert_eq!(triggers.path(), "dbs/mydb/colls/mystore/triggers");

        let udfs = container_link().feed(ResourceType::UserDefinedFunctions);
        assert_eq!(udfs.path(), "dbs/mydb/colls/mystore/udfs");
    }

    #[test]
    fn resolves_against_endpoint() {
        let endpoint: Url = "https://localhost:8081/".parse().unwrap();
        let url = container_link().feed(ResourceType::Items).item("a b").url(&endpoint);
        assert_eq!(
            url.as_str(),
            "https://localhost:8081/dbs/mydb/colls/mystore/docs/a%20b"
        );
    }
}
