use serde::{Deserialize, Serialize};

/// Name of the vacancy pseudo-moiety.
pub const VACANCY: &str = "Va";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoietyTerm {
    /// Display name embedding the site index, e.g. `{Ca}0`.
    pub name: String,
    /// Moiety name as written between the braces, e.g. `Ca`.
    pub moiety: String,
    /// Zero-based sublattice site.
    pub site: usize,
    /// Fraction of the site occupied by this moiety.
    pub occupancy: f64,
}

impl MoietyTerm {
    pub fn new(moiety: impl Into<String>, site: usize, occupancy: f64) -> Self {
        let moiety = moiety.into();
        Self {
            name: format!("{{{moiety}}}{site}"),
            moiety,
            site,
            occupancy,
        }
    }

    pub fn vacancy(site: usize, occupancy: f64) -> Self {
        Self::new(VACANCY, site, occupancy)
    }

    #[inline]
    pub fn is_vacancy(&self) -> bool {
        self.moiety == VACANCY
    }
}

/// Moieties of a solid-solution end-member, in the order they were written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoietyFormula {
    /// Number of site separators seen, i.e. the count of completed sites.
    pub sites: usize,
    pub terms: Vec<MoietyTerm>,
}

impl MoietyFormula {
    #[inline]
    pub fn site_count(&self) -> usize {
        self.sites
    }

    #[inline]
    pub fn terms(&self) -> &[MoietyTerm] {
        &self.terms
    }

    pub fn on_site(&self, site: usize) -> impl Iterator<Item = &MoietyTerm> {
        self.terms.iter().filter(move |t| t.site == site)
    }

    /// Sum of occupancies written for `site`.
    pub fn site_occupancy(&self, site: usize) -> f64 {
        self.on_site(site).map(|t| t.occupancy).sum()
    }

    pub fn into_parts(self) -> (usize, Vec<MoietyTerm>) {
        (self.sites, self.terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_embeds_site_index() {
        let term = MoietyTerm::new("Ca", 2, 0.5);
        assert_eq!(term.name, "{Ca}2");
        assert_eq!(term.moiety, "Ca");
        assert_eq!(term.site, 2);
        assert_eq!(term.occupancy, 0.5);
        assert!(!term.is_vacancy());
    }

    #[test]
    fn vacancy_term() {
        let term = MoietyTerm::vacancy(1, 1.0);
        assert_eq!(term.name, "{Va}1");
        assert!(term.is_vacancy());
    }

    #[test]
    fn site_queries() {
        let formula = MoietyFormula {
            sites: 2,
            terms: vec![
                MoietyTerm::new("Ca", 0, 0.25),
                MoietyTerm::new("Mg", 0, 0.75),
                MoietyTerm::new("Si", 1, 1.0),
            ],
        };
        assert_eq!(formula.site_count(), 2);
        assert_eq!(formula.on_site(0).count(), 2);
        assert_eq!(formula.site_occupancy(0), 1.0);
        assert_eq!(formula.site_occupancy(3), 0.0);

        let (sites, terms) = formula.into_parts();
        assert_eq!(sites, 2);
        assert_eq!(terms.len(), 3);
    }
}
