use time::OffsetDateTime;

use crate::application::metadata::{MetadataBuilder, PageMetadata};
use crate::config::SiteSettings;
use crate::presentation::views::{
    BrandView, FooterView, LayoutChrome, NavigationLinkView, NavigationView, PageMetaView,
};

const NAVIGATION: [(&str, &str); 5] = [
    ("Home", "/#home"),
    ("About", "/#about"),
    ("Projects", "/#projects"),
    ("Blog", "/blog"),
    ("Contact", "/#contact"),
];

/// Site-wide layout pieces shared by every rendered page.
#[derive(Clone)]
pub struct ChromeService {
    metadata: MetadataBuilder,
    footer_copy: String,
}

impl ChromeService {
    pub fn new(site: &SiteSettings) -> Self {
        let metadata = MetadataBuilder::new(site.title.clone(), site.description.clone());
        let year = OffsetDateTime::now_utc().year();
        Self {
            footer_copy: format!("© {year} {}. All rights reserved.", site.title),
            metadata,
        }
    }

    pub fn metadata(&self) -> &MetadataBuilder {
        &self.metadata
    }

    pub fn chrome(&self, meta: PageMetadata, canonical: &str) -> LayoutChrome {
        let entries = NAVIGATION
            .iter()
            .map(|(label, href)| NavigationLinkView {
                label: (*label).to_string(),
                href: (*href).to_string(),
            })
            .collect();

        LayoutChrome {
            brand: BrandView {
                title: self.metadata.site_title().to_string(),
                href: "/".to_string(),
            },
            navigation: NavigationView { entries },
            footer: FooterView {
                copy: self.footer_copy.clone(),
            },
            meta: PageMetaView::from(meta),
        }
        .with_canonical(canonical.to_string())
    }
}
