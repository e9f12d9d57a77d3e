// Copyright 2025 Kompo Contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Registry of supported component types (language/framework runtimes).

/// One supported runtime in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub builder_image: &'static str,
    pub description: &'static str,
}

/// Supported runtimes, keyed by the component type users pass to `create`.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "nodejs",
        builder_image: "registry.access.redhat.com/ubi9/nodejs-20",
        description: "Node.js runtime",
    },
    CatalogEntry {
        name: "python",
        builder_image: "registry.access.redhat.com/ubi9/python-312",
        description: "Python runtime",
    },
    CatalogEntry {
        name: "ruby",
        builder_image: "registry.access.redhat.com/ubi9/ruby-33",
        description: "Ruby runtime",
    },
    CatalogEntry {
        name: "php",
        builder_image: "registry.access.redhat.com/ubi9/php-82",
        description: "PHP runtime",
    },
    CatalogEntry {
        name: "perl",
        builder_image: "registry.access.redhat.com/ubi9/perl-532",
        description: "Perl runtime",
    },
    CatalogEntry {
        name: "openjdk",
        builder_image: "registry.access.redhat.com/ubi9/openjdk-21",
        description: "OpenJDK runtime",
    },
    CatalogEntry {
        name: "wildfly",
        builder_image: "quay.io/wildfly/wildfly-s2i:latest",
        description: "WildFly application server",
    },
    CatalogEntry {
        name: "dotnet",
        builder_image: "registry.access.redhat.com/ubi9/dotnet-80",
        description: ".NET runtime",
    },
    CatalogEntry {
        name: "httpd",
        builder_image: "registry.access.redhat.com/ubi9/httpd-24",
        description: "Apache HTTP server",
    },
];

pub fn lookup(component_type: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.name == component_type)
}

pub fn exists(component_type: &str) -> bool {
    lookup(component_type).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_type() {
        let entry = lookup("nodejs").unwrap();
        assert!(entry.builder_image.contains("nodejs"));
    }

    #[test]
    fn test_lookup_unknown_type() {
        assert!(lookup("cobol").is_none());
        assert!(!exists("cobol"));
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let mut names: Vec<_> = CATALOG.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }
}
