use crate::config::SiteSettings;
use crate::presentation::views::{BrandView, LayoutChrome, PageMetaView};

const PAGE_LANG: &str = "pl";

/// Site-wide layout pieces derived from configuration.
#[derive(Clone)]
pub struct ChromeService {
    chrome: LayoutChrome,
}

impl ChromeService {
    pub fn new(site: &SiteSettings) -> Self {
        let chrome = LayoutChrome {
            brand: BrandView {
                title: site.title.clone(),
                href: "/".to_string(),
            },
            meta: PageMetaView {
                title: site.title.clone(),
                description: site.description.clone(),
                lang: PAGE_LANG.to_string(),
            },
        };

        Self { chrome }
    }

    pub fn load(&self) -> LayoutChrome {
        self.chrome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_reflects_site_settings() {
        let service = ChromeService::new(&SiteSettings {
            title: "Wynajem".to_string(),
            description: "Mieszkania".to_string(),
        });

        let chrome = service.load();
        assert_eq!(chrome.brand.title, "Wynajem");
        assert_eq!(chrome.brand.href, "/");
        assert_eq!(chrome.meta.description, "Mieszkania");
        assert_eq!(chrome.meta.lang, "pl");
    }
}
