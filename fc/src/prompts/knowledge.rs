//! Firefighting strategy knowledge base
//!
//! Structured background on the four deployment strategies, rendered into the
//! advisory system prompt at template-definition time.

/// One deployment strategy with its decision criteria.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub doelen: &'static [&'static str],
    pub criteria: &'static [&'static str],
    pub risicos: &'static [&'static str],
    pub technieken: &'static [&'static str],
}

/// The four deployment strategies.
pub const STRATEGIES: [Strategy; 4] = [
    Strategy {
        name: "Defensieve buiteninzet",
        doelen: &[
            "Het voorkomen van uitbreiding naar belendende panden",
            "Het voorkomen van milieuschade",
            "Het beperken van de effecten van rook",
        ],
        criteria: &[
            "Brand heeft zich al verspreid",
            "Directe interventie is te gevaarlijk",
            "Brand is niet meer te blussen van binnen",
            "Er is geen direct gevaar voor mensenlevens",
        ],
        risicos: &[
            "Uitbreiding van de brand",
            "Milieuschade door bluswater",
            "Rookverspreiding",
            "Schade aan omliggende gebouwen",
        ],
        technieken: &[
            "Water geven op afstand",
            "Ventilatie van buitenaf",
            "Brandwacht houden",
            "Monitoring van de situatie",
        ],
    },
    Strategy {
        name: "Offensieve buiteninzet",
        doelen: &[
            "Verbeteren van levenscondities van eventuele slachtoffers",
            "Mogelijk maken van een veilige betreding",
            "Voorkomen van uitbreiding",
            "Blussen van de brand",
        ],
        criteria: &[
            "Er zijn slachtoffers in het gebouw",
            "Directe toegang is te gevaarlijk",
            "Brand is nog beperkt",
            "Er is kans op succesvolle interventie",
        ],
        risicos: &["Flashover", "Backdraft", "Instorting", "Verslechtering van de situatie"],
        technieken: &[
            "Koude snede",
            "Massale aanval",
            "Ventilatie van buitenaf",
            "Brandwacht houden",
        ],
    },
    Strategy {
        name: "Defensieve binneninzet",
        doelen: &[
            "Gelegenheid bieden voor een evacuatie",
            "Het voorkomen van uitbreiding",
            "Het voorkomen van rookverspreiding",
            "Schadebeperking",
        ],
        criteria: &[
            "Er zijn nog mensen in het gebouw",
            "Brand is nog niet volledig ingeperkt",
            "Evacuatie is mogelijk",
            "Er is voldoende beveiliging",
        ],
        risicos: &["Flashover", "Backdraft", "Instorting", "Rookverspreiding"],
        technieken: &[
            "Ventilatie van binnenuit",
            "Brandwacht houden",
            "Evacuatie begeleiden",
            "Brandcompartimentering behouden",
        ],
    },
    Strategy {
        name: "Offensieve binneninzet",
        doelen: &["Redding van mensen", "Bestrijding van brand"],
        criteria: &[
            "Directe redding van mensenlevens vereist",
            "Brand is nog beperkt",
            "Er is voldoende beveiliging",
            "Er is kans op succesvolle interventie",
        ],
        risicos: &["Flashover", "Backdraft", "Instorting", "Verslechtering van de situatie"],
        technieken: &[
            "Directe brandbestrijding",
            "Redding van slachtoffers",
            "Brandcompartimentering behouden",
            "Ventilatie van binnenuit",
        ],
    },
];

/// Render the knowledge base as the plain-text block embedded in the advisory
/// system prompt.
pub fn knowledge_summary() -> String {
    let mut out = String::new();
    for strategy in &STRATEGIES {
        out.push_str(strategy.name);
        out.push('\n');
        push_section(&mut out, "Doelen", strategy.doelen);
        push_section(&mut out, "Criteria", strategy.criteria);
        push_section(&mut out, "Risico's", strategy.risicos);
        push_section(&mut out, "Technieken", strategy.technieken);
        out.push('\n');
    }
    out
}

fn push_section(out: &mut String, label: &str, items: &[&str]) {
    out.push_str(label);
    out.push_str(":\n");
    for item in items {
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
}
