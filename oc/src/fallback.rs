//! Canned fallback answers for the timeout path
//!
//! When the model service does not answer within the wait ceiling, the client
//! synthesizes a local answer by keyword-matching the prompt against the four
//! deployment strategies. This is a heuristic, not model output, and it never
//! fails.

const DEFENSIEF_BUITEN: &str = "Defensieve buiteninzet\n---------------------------------\nDeze strategie is geschikt voor situaties waarbij de brand zich heeft verspreid en directe interventie te gevaarlijk is. Door van buitenaf te blussen, kan de brand worden ingeperkt zonder dat brandweerlieden onnodig risico lopen.\n\nMonitor de situatie en pas de strategie aan als de omstandigheden veranderen. Zorg voor voldoende water en blusmiddelen.";

const OFFENSIEF_BUITEN: &str = "Offensieve buiteninzet\n---------------------------------\nDeze strategie is effectief wanneer er slachtoffers in het gebouw zijn, maar directe toegang te gevaarlijk is. Door van buitenaf te blussen, kunnen de omstandigheden binnen verbeteren en kan een veilige toegang worden gecre\u{eb}erd.\n\nBereid je voor op een mogelijke overgang naar een offensieve binneninzet zodra de omstandigheden het toelaten.";

const DEFENSIEF_BINNEN: &str = "Defensieve binneninzet\n---------------------------------\nDeze strategie is geschikt wanneer er nog mensen in het gebouw zijn die ge\u{eb}vacueerd moeten worden, maar de brand nog niet volledig is ingeperkt. Door strategisch binnen te gaan, kunnen evacuaties worden gefaciliteerd terwijl de brand wordt bestreden.\n\nZorg voor goede communicatie tussen de binnen- en buitenploegen en heb een duidelijk terugtrekkingsplan.";

const OFFENSIEF_BINNEN: &str = "Offensieve binneninzet\n---------------------------------\nDeze strategie is nodig wanneer er directe redding van mensenlevens vereist is en de brand nog beperkt is. Door snel binnen te gaan, kunnen slachtoffers worden gered voordat de brand zich verder verspreidt.\n\nZorg voor voldoende beveiliging en een duidelijk communicatieplan met de buitenploeg.";

const GENERIC: &str = "Defensieve buiteninzet\n---------------------------------\nOp basis van de beschreven situatie lijkt een defensieve buiteninzet de meest geschikte strategie. Deze aanpak minimaliseert risico's voor brandweerlieden terwijl de brand wordt ingeperkt.\n\nMonitor de situatie en pas de strategie aan als de omstandigheden veranderen.";

/// Pick a canned answer by keyword-matching the prompt (case-insensitive).
pub fn canned_fallback(prompt: &str) -> &'static str {
    let prompt = prompt.to_lowercase();

    let defensief = prompt.contains("defensief");
    let offensief = prompt.contains("offensief");
    let buiten = prompt.contains("buiten");
    let binnen = prompt.contains("binnen");

    if defensief && buiten {
        DEFENSIEF_BUITEN
    } else if offensief && buiten {
        OFFENSIEF_BUITEN
    } else if defensief && binnen {
        DEFENSIEF_BINNEN
    } else if offensief && binnen {
        OFFENSIEF_BINNEN
    } else {
        GENERIC
    }
}
