//! Province directory mapping URL slugs to dataset province names.
//!
//! Built once at startup and shared read-only; there is no way to mutate it
//! after construction.

use serde::Serialize;

use crate::{Error, Result};

/// A province as exposed by `GET /provinces`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Province {
  pub slug:     String,
  /// The exact spelling used in the dataset's `carga_provincia_nombre`.
  #[serde(rename = "province")]
  pub name:     String,
}

const ARGENTINA: &[(&str, &str)] = &[
  ("caba", "CABA"),
  ("buenos-aires", "Buenos Aires"),
  ("catamarca", "Catamarca"),
  ("chaco", "Chaco"),
  ("chubut", "Chubut"),
  ("cordoba", "Córdoba"),
  ("corrientes", "Corrientes"),
  ("entre-rios", "Entre Ríos"),
  ("formosa", "Formosa"),
  ("jujuy", "Jujuy"),
  ("la-pampa", "La Pampa"),
  ("la-rioja", "La Rioja"),
  ("mendoza", "Mendoza"),
  ("misiones", "Misiones"),
  ("neuquen", "Neuquén"),
  ("rio-negro", "Río Negro"),
  ("salta", "Salta"),
  ("san-juan", "San Juan"),
  ("san-luis", "San Luis"),
  ("santa-cruz", "Santa Cruz"),
  ("santa-fe", "Santa Fe"),
  ("santiago-del-estero", "Santiago del Estero"),
  ("tierra-del-fuego", "Tierra del Fuego"),
  ("tucuman", "Tucumán"),
];

/// Immutable slug → province lookup table.
#[derive(Debug, Clone)]
pub struct ProvinceDirectory {
  provinces: Vec<Province>,
}

impl ProvinceDirectory {
  pub fn new(provinces: Vec<Province>) -> Self { Self { provinces } }

  /// The 24 Argentine jurisdictions as named in the national dataset.
  pub fn argentina() -> Self {
    Self::new(
      ARGENTINA
        .iter()
        .map(|(slug, name)| Province {
          slug: (*slug).to_owned(),
          name: (*name).to_owned(),
        })
        .collect(),
    )
  }

  /// Look up a slug. Unknown slugs are an error rather than an empty match,
  /// so a typo never silently returns nothing.
  pub fn resolve(&self, slug: &str) -> Result<&Province> {
    self
      .provinces
      .iter()
      .find(|p| p.slug == slug)
      .ok_or_else(|| Error::UnknownProvince(slug.to_owned()))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Province> { self.provinces.iter() }

  pub fn len(&self) -> usize { self.provinces.len() }

  pub fn is_empty(&self) -> bool { self.provinces.is_empty() }
}
