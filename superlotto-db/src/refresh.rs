use std::path::Path;

use crate::error::{LottoError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSummary {
    pub latest_period: String,
    pub bytes: usize,
}

/// Télécharge l'historique et remplace la copie locale. Pas de nouvel essai en cas d'échec.
pub fn refresh_history(url: &str, dest: &Path) -> Result<RefreshSummary> {
    if url.is_empty() {
        return Err(LottoError::Config("download_url non configurée".to_string()));
    }
    log::info!("Récupération des derniers tirages depuis {}", url);

    let resp = reqwest::blocking::get(url)
        .map_err(|e| LottoError::Refresh(format!("GET {} : {}", url, e)))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LottoError::Refresh(format!("GET {} : statut {}", url, status)));
    }
    let body = resp
        .bytes()
        .map_err(|e| LottoError::Refresh(format!("lecture de la réponse : {}", e)))?;

    let latest_period = latest_period(&String::from_utf8_lossy(&body))
        .ok_or_else(|| LottoError::Refresh("réponse vide".to_string()))?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| LottoError::PersistenceWrite(format!("{:?} : {}", parent, e)))?;
    }
    std::fs::write(dest, &body).map_err(|e| LottoError::PersistenceWrite(format!("{:?} : {}", dest, e)))?;

    Ok(RefreshSummary {
        latest_period,
        bytes: body.len(),
    })
}

/// Première colonne de la dernière ligne non vide, guillemets retirés.
///
/// L'historique est rangé du plus ancien au plus récent, comme le suppose
/// [`crate::source::load_history`] : le dernier tirage est en fin de fichier.
pub fn latest_period(content: &str) -> Option<String> {
    let last = content.lines().rev().find(|l| !l.trim().is_empty())?;
    let period = last.replace('"', "");
    let period = period.split(',').next()?.trim();
    if period.is_empty() {
        None
    } else {
        Some(period.to_string())
    }
}
