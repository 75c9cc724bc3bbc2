//! Embedded page templates

use once_cell::sync::Lazy;
use tera::{Context, Tera};

/// Template engine with every page compiled in.
pub static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();

    tera.add_raw_templates(vec![
        ("base.html", BASE_TEMPLATE),
        ("index.html", INDEX_TEMPLATE),
        ("demo.html", DEMO_TEMPLATE),
        ("about.html", ABOUT_TEMPLATE),
        ("help.html", HELP_TEMPLATE),
        ("intro.html", INTRO_TEMPLATE),
        ("linked_databases.html", LINKED_DATABASES_TEMPLATE),
        ("visualization.html", VISUALIZATION_TEMPLATE),
    ])
    .expect("embedded templates failed to parse");

    tera
});

/// Render a template with context
pub fn render(template: &str, context: &Context) -> Result<String, tera::Error> {
    TEMPLATES.render(template, context)
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{% block title %}Gap-Filled Model Catalogue{% endblock %}</title>
    <style>
        :root {
            --bg: #f7f8fa;
            --panel: #ffffff;
            --text: #1d2330;
            --muted: #5b6475;
            --border: #d9dee7;
            --accent: #2d6a4f;
            --error: #b3261e;
        }
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }
        header { background: var(--accent); color: #fff; padding: 16px 32px; }
        header a { color: #fff; margin-right: 18px; text-decoration: none; }
        header a:hover { text-decoration: underline; }
        main { max-width: 1200px; margin: 0 auto; padding: 24px 32px; }
        section { background: var(--panel); border: 1px solid var(--border); border-radius: 6px; padding: 20px; margin-bottom: 24px; }
        table { width: 100%; border-collapse: collapse; font-size: 14px; }
        th, td { border-bottom: 1px solid var(--border); padding: 6px 8px; text-align: left; }
        th { color: var(--muted); font-weight: 600; }
        label { display: block; margin: 8px 0 4px; font-weight: 600; }
        input[type=text], select { padding: 6px; min-width: 260px; }
        .error { color: var(--error); font-weight: 600; }
        .muted { color: var(--muted); }
        footer { text-align: center; color: var(--muted); font-size: 13px; padding: 24px; }
    </style>
</head>
<body>
    <header>
        <a href="/"><strong>Gap-Filled Models</strong></a>
        <a href="/intro">Introduction</a>
        <a href="/demo">SQL Demo</a>
        <a href="/linked_databases">Linked Databases</a>
        <a href="/visualization">Visualization</a>
        <a href="/help">Help</a>
        <a href="/about">About</a>
    </header>
    <main>
        {% block content %}{% endblock %}
    </main>
    <footer>&copy; {{ current_year }} Gap-Filled Metabolic Model Catalogue</footer>
</body>
</html>
"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block content %}
<section>
    <h2>Search models by growth media</h2>
    <form method="post" action="/search">
        <label for="media_search">Growth media contains</label>
        <input type="text" id="media_search" name="media_search" value="{{ media_search | default(value="") }}">
        <label for="growth_filter">Growth outcome</label>
        <select id="growth_filter" name="growth_filter">
            <option value="all" {% if growth_filter == "all" %}selected{% endif %}>All</option>
            <option value="growth" {% if growth_filter == "growth" %}selected{% endif %}>Growth</option>
            <option value="no_growth" {% if growth_filter == "no_growth" %}selected{% endif %}>No growth</option>
        </select>
        <button type="submit">Search</button>
    </form>
</section>

<section>
    {% if media_search is defined and media_search %}
    <h2>Results for "{{ media_search }}"</h2>
    {% elif media_search is defined %}
    <h2>All models</h2>
    {% else %}
    <h2>Latest models</h2>
    {% endif %}

    {% if error_message %}<p class="error">{{ error_message }}</p>{% endif %}

    {% if search_results | length > 0 %}
    <table>
        <thead>
            <tr>
                <th>ID</th><th>Species</th><th>Growth media</th><th>Algorithm</th>
                <th>Annotation</th><th>Growth</th><th>Model file</th><th>Side files</th>
            </tr>
        </thead>
        <tbody>
        {% for model in search_results %}
            <tr>
                <td>{{ model.id }}</td>
                <td>{{ model.species_name }}</td>
                <td>{{ model.growth_media | default(value="") }}</td>
                <td>{{ model.gapfill_algorithm | default(value="") }}</td>
                <td>{{ model.annotation_tool | default(value="") }}</td>
                <td>{{ model.growth_data | default(value="") }}</td>
                <td><a href="/download/{{ model.file_link }}">{{ model.file_name }}</a></td>
                <td>
                    {% if model.growth_file %}<a href="/download/{{ model.growth_file }}">growth</a> {% endif %}
                    {% if model.biomass_file_5mM %}<a href="/download/{{ model.biomass_file_5mM }}">5mM</a> {% endif %}
                    {% if model.biomass_file_20mM %}<a href="/download/{{ model.biomass_file_20mM }}">20mM</a>{% endif %}
                </td>
            </tr>
        {% endfor %}
        </tbody>
    </table>
    {% elif not error_message %}
    <p class="muted">No models found.</p>
    {% endif %}
</section>

<section>
    <h2>Upload a model</h2>
    <form method="post" action="/api/models" enctype="multipart/form-data">
        <label for="modelUpload">Model file (.xml or .tsv)</label>
        <input type="file" id="modelUpload" name="modelUpload" accept=".xml,.tsv" required>
        <label for="growth_media">Growth media</label>
        <input type="text" id="growth_media" name="growth_media" required>
        <label for="gapfill_algorithm">Gap-filling algorithm</label>
        <input type="text" id="gapfill_algorithm" name="gapfill_algorithm">
        <label for="annotation_tool">Annotation tool</label>
        <input type="text" id="annotation_tool" name="annotation_tool">
        <label for="growth_data">Growth outcome</label>
        <select id="growth_data" name="growth_data">
            <option value="">Unknown</option>
            <option value="Growth">Growth</option>
            <option value="No Growth">No Growth</option>
        </select>
        <label for="growth_file_upload">Growth curve (.tsv, optional)</label>
        <input type="file" id="growth_file_upload" name="growth_file_upload" accept=".tsv">
        <label for="biomass_5mM_upload">Biomass at 5mM (.tsv, optional)</label>
        <input type="file" id="biomass_5mM_upload" name="biomass_5mM_upload" accept=".tsv">
        <label for="biomass_20mM_upload">Biomass at 20mM (.tsv, optional)</label>
        <input type="file" id="biomass_20mM_upload" name="biomass_20mM_upload" accept=".tsv">
        <p><button type="submit">Upload</button></p>
    </form>
</section>
{% endblock %}
"##;

const DEMO_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}SQL Demo - Gap-Filled Models{% endblock %}
{% block content %}
<section>
    <h2>Metabolic reactions (organism Ecoli_K12)</h2>
    {% if metabolic_reactions | length > 0 %}
    <table>
        <thead><tr><th>Reaction</th><th>Name</th><th>Metabolites</th><th>Flux</th></tr></thead>
        <tbody>
        {% for row in metabolic_reactions %}
            <tr><td>{{ row.reaction_id }}</td><td>{{ row.reaction_name }}</td><td>{{ row.metabolites }}</td><td>{{ row.flux_value }}</td></tr>
        {% endfor %}
        </tbody>
    </table>
    {% else %}<p class="muted">No rows.</p>{% endif %}
</section>

<section>
    <h2>Gap-filling results (model Model_123)</h2>
    {% if gapfill_reactions | length > 0 %}
    <table>
        <thead><tr><th>Model</th><th>Reaction</th><th>Name</th><th>Source database</th></tr></thead>
        <tbody>
        {% for row in gapfill_reactions %}
            <tr><td>{{ row.model_id }}</td><td>{{ row.reaction_id }}</td><td>{{ row.reaction_name }}</td><td>{{ row.source_database }}</td></tr>
        {% endfor %}
        </tbody>
    </table>
    {% else %}<p class="muted">No rows.</p>{% endif %}
</section>

<section>
    <h2>Experimental conditions (experiment Exp_20250321)</h2>
    {% if experiments | length > 0 %}
    <table>
        <thead><tr><th>Experiment</th><th>Media</th><th>Temperature</th><th>Outcome</th></tr></thead>
        <tbody>
        {% for row in experiments %}
            <tr><td>{{ row.experiment_id }}</td><td>{{ row.media_composition }}</td><td>{{ row.temperature }}</td><td>{{ row.growth_outcome }}</td></tr>
        {% endfor %}
        </tbody>
    </table>
    {% else %}<p class="muted">No rows.</p>{% endif %}
</section>
{% endblock %}
"##;

const ABOUT_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}About - Gap-Filled Models{% endblock %}
{% block content %}
<section>
    <h2>About</h2>
    <p>This catalogue collects genome-scale metabolic models of <em>P. simiae</em>
    that were completed by gap-filling, together with the growth media, the
    gap-filling algorithm and the annotation tool used to build each one.</p>
    <p>Models can be searched by growth medium and downloaded alongside any growth
    curves and biomass measurements that were uploaded with them.</p>
</section>
{% endblock %}
"##;

const HELP_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Help - Gap-Filled Models{% endblock %}
{% block content %}
<section>
    <h2>Help</h2>
    <h3>Searching</h3>
    <p>Enter part of a growth medium name. Matching ignores case. Leave the box
    empty to list every model, and narrow the list with the growth outcome filter.</p>
    <h3>Uploading</h3>
    <p>The model file must be SBML (<code>.xml</code>) or tab-separated
    (<code>.tsv</code>). A file name can only be uploaded once; rename the file to
    upload a new version. Growth and biomass files are optional and must be
    <code>.tsv</code>; other types are ignored.</p>
    <h3>Downloading</h3>
    <p>Follow the links in the results table to download a model or its side files.</p>
</section>
{% endblock %}
"##;

const INTRO_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Introduction - Gap-Filled Models{% endblock %}
{% block content %}
<section>
    <h2>Introduction</h2>
    <p>Draft metabolic reconstructions built from genome annotations usually miss
    reactions, so the model cannot produce biomass on media where the organism is
    known to grow. Gap-filling adds the smallest set of reactions from a reference
    database that restores growth.</p>
    <p>Different annotation tools and gap-filling algorithms give different
    answers. Comparing their models against measured growth on each medium shows
    which combinations predict growth correctly.</p>
</section>
{% endblock %}
"##;

const LINKED_DATABASES_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Linked Databases - Gap-Filled Models{% endblock %}
{% block content %}
<section>
    <h2>Linked databases</h2>
    <ul>
        <li><a href="https://www.genome.jp/kegg/">KEGG</a>: pathways and reaction references</li>
        <li><a href="https://modelseed.org/">ModelSEED</a>: biochemistry database used for gap-filling</li>
        <li><a href="http://bigg.ucsd.edu/">BiGG Models</a>: curated genome-scale models</li>
        <li><a href="https://metacyc.org/">MetaCyc</a>: experimentally elucidated pathways</li>
        <li><a href="https://fit.genomics.lbl.gov/">Fitness Browser</a>: mutant fitness data for <em>P. simiae</em></li>
    </ul>
</section>
{% endblock %}
"##;

const VISUALIZATION_TEMPLATE: &str = r##"{% extends "base.html" %}
{% block title %}Visualization - Gap-Filled Models{% endblock %}
{% block content %}
<section>
    <h2>Visualization</h2>
    <p>Download a model file from the catalogue and open it in an SBML viewer
    such as Escher to draw its pathways. Growth curve and biomass files are plain
    tab-separated tables that load directly into a spreadsheet or plotting tool.</p>
</section>
{% endblock %}
"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        let mut context = Context::new();
        context.insert("current_year", &2026);
        context
    }

    #[test]
    fn informational_pages_render() {
        for page in [
            "about.html",
            "help.html",
            "intro.html",
            "linked_databases.html",
            "visualization.html",
        ] {
            let html = render(page, &context()).unwrap();
            assert!(html.contains("&copy; 2026"), "{page} missing footer");
        }
    }

    #[test]
    fn index_escapes_search_term() {
        let mut context = context();
        context.insert("search_results", &Vec::<serde_json::Value>::new());
        context.insert("media_search", "<script>");
        context.insert("growth_filter", "all");
        context.insert("error_message", &Option::<String>::None);

        let html = render("index.html", &context).unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("No models found."));
    }

    #[test]
    fn demo_renders_empty_tables() {
        let mut context = context();
        let empty = Vec::<serde_json::Value>::new();
        context.insert("metabolic_reactions", &empty);
        context.insert("gapfill_reactions", &empty);
        context.insert("experiments", &empty);

        let html = render("demo.html", &context).unwrap();
        assert_eq!(html.matches("No rows.").count(), 3);
    }
}
