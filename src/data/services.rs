/// An emergency service listed in the directory screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub name: &'static str,
    pub phone: Option<&'static str>,
    pub url: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceAction {
    Call { label: String, uri: String },
    OpenWeb { label: String, url: String },
    Cancel,
}

impl ServiceAction {
    pub fn label(&self) -> &str {
        match self {
            ServiceAction::Call { label, .. } => label,
            ServiceAction::OpenWeb { label, .. } => label,
            ServiceAction::Cancel => "❌ Cancelar",
        }
    }

    /// Target handed to the platform opener, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            ServiceAction::Call { uri, .. } => Some(uri),
            ServiceAction::OpenWeb { url, .. } => Some(url),
            ServiceAction::Cancel => None,
        }
    }
}

pub const SERVICES: [Service; 5] = [
    Service {
        name: "Policía Municipal",
        phone: Some("958111111"),
        url: "https://granada.es/policia",
    },
    Service {
        name: "Guardia Civil",
        phone: Some("958222222"),
        url: "https://www.guardiacivil.es/",
    },
    Service {
        name: "Policía Nacional",
        phone: Some("958333333"),
        url: "https://www.policia.es/",
    },
    Service {
        name: "Ejército Español",
        phone: Some("910000000"),
        url: "https://ejercito.defensa.gob.es/",
    },
    Service {
        name: "Registro Electrónico General",
        phone: None,
        url: "https://sede.administracion.gob.es/",
    },
];

impl Service {
    pub fn label(&self) -> String {
        match self.phone {
            Some(phone) => format!("{} - {}", self.name, phone),
            None => self.name.to_string(),
        }
    }

    pub fn actions(&self) -> Vec<ServiceAction> {
        let mut actions = Vec::with_capacity(3);
        if let Some(phone) = self.phone {
            actions.push(ServiceAction::Call {
                label: format!("📞 Llamar a {}", self.name),
                uri: format!("tel:{}", phone),
            });
        }
        actions.push(ServiceAction::OpenWeb {
            label: "🌐 Abrir web oficial".to_string(),
            url: self.url.to_string(),
        });
        actions.push(ServiceAction::Cancel);
        actions
    }
}

/// 1-based lookup, matching the numbering shown on screen.
pub fn service_at(position: usize) -> Option<&'static Service> {
    position.checked_sub(1).and_then(|idx| SERVICES.get(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_with_phone_offer_a_call() {
        let police = service_at(1).unwrap();
        assert_eq!(police.label(), "Policía Municipal - 958111111");
        let actions = police.actions();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[0].target(), Some("tel:958111111"));
        assert_eq!(actions[2], ServiceAction::Cancel);
    }

    #[test]
    fn registry_has_only_web_and_cancel() {
        let registry = service_at(5).unwrap();
        assert_eq!(registry.label(), "Registro Electrónico General");
        let actions = registry.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].target(), Some("https://sede.administracion.gob.es/"));
    }

    #[test]
    fn out_of_range_positions_are_none() {
        assert!(service_at(0).is_none());
        assert!(service_at(6).is_none());
    }
}
