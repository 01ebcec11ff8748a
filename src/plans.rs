//! Subscription plan catalog.
//!
//! Static tier data rendered by the plan screens; nothing here is
//! persisted. New accounts start on the free trial.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    #[default]
    Trial,
    Basico,
    Premium,
    Enterprise,
}

impl PlanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Trial => "trial",
            PlanKind::Basico => "basico",
            PlanKind::Premium => "premium",
            PlanKind::Enterprise => "enterprise",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "trial" => Some(PlanKind::Trial),
            "basico" => Some(PlanKind::Basico),
            "premium" => Some(PlanKind::Premium),
            "enterprise" => Some(PlanKind::Enterprise),
            _ => None,
        }
    }

    /// The tier's limitations as shown on the plan comparison screen.
    pub fn limits(&self) -> PlanLimits {
        match self {
            PlanKind::Trial => PlanLimits {
                name: "Modo de Teste Gratuito",
                description: "Pacote de teste com limitações básicas para experimentar a plataforma",
                duracao: "60 dias",
                anuncios_por_mes: Some(5),
                campanhas_simultaneas: Some(2),
                armazenamento_mb: Some(100),
                suporte: "Email",
                relatorios: "Básicos",
            },
            PlanKind::Basico => PlanLimits {
                name: "Pacote Básico",
                description: "Ideal para pequenas empresas que estão começando",
                duracao: "Mensal",
                anuncios_por_mes: Some(20),
                campanhas_simultaneas: Some(5),
                armazenamento_mb: Some(1024),
                suporte: "Email + Chat",
                relatorios: "Completos",
            },
            PlanKind::Premium => PlanLimits {
                name: "Pacote Premium",
                description: "Para empresas que precisam de mais recursos e alcance",
                duracao: "Mensal",
                anuncios_por_mes: Some(100),
                campanhas_simultaneas: Some(20),
                armazenamento_mb: Some(10240),
                suporte: "Prioritário 24/7",
                relatorios: "Avançados + Analytics",
            },
            PlanKind::Enterprise => PlanLimits {
                name: "Pacote Enterprise",
                description: "Solução completa para grandes empresas com necessidades específicas",
                duracao: "Personalizado",
                anuncios_por_mes: None,
                campanhas_simultaneas: None,
                armazenamento_mb: None,
                suporte: "Dedicado + Gerente de conta",
                relatorios: "Customizados + API",
            },
        }
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tier limitations. `None` means unlimited.
#[derive(Debug, Clone, Serialize)]
pub struct PlanLimits {
    pub name: &'static str,
    pub description: &'static str,
    pub duracao: &'static str,
    pub anuncios_por_mes: Option<u32>,
    pub campanhas_simultaneas: Option<u32>,
    pub armazenamento_mb: Option<u64>,
    pub suporte: &'static str,
    pub relatorios: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan_is_trial() {
        assert_eq!(PlanKind::default(), PlanKind::Trial);
    }

    #[test]
    fn test_plan_kind_roundtrip() {
        for kind in [
            PlanKind::Trial,
            PlanKind::Basico,
            PlanKind::Premium,
            PlanKind::Enterprise,
        ] {
            assert_eq!(PlanKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PlanKind::from_str("gold"), None);
    }

    #[test]
    fn test_tiers_scale_up() {
        let trial = PlanKind::Trial.limits();
        let basico = PlanKind::Basico.limits();
        let premium = PlanKind::Premium.limits();

        assert!(trial.anuncios_por_mes < basico.anuncios_por_mes);
        assert!(basico.anuncios_por_mes < premium.anuncios_por_mes);
        assert_eq!(trial.anuncios_por_mes, Some(5));
    }

    #[test]
    fn test_enterprise_is_unlimited() {
        let limits = PlanKind::Enterprise.limits();
        assert_eq!(limits.anuncios_por_mes, None);
        assert_eq!(limits.campanhas_simultaneas, None);
        assert_eq!(limits.armazenamento_mb, None);
    }
}
