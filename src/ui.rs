pub fn render_index(date: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Planificador de Fletes</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1040px, 100%);
      margin: 0 auto;
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      align-items: center;
      justify-content: space-between;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .toolbar, .duplicate {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    input, select, textarea {
      font: inherit;
      padding: 8px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    textarea {
      width: 100%;
      min-height: 56px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.primary {
      background: var(--accent);
    }

    button:disabled {
      opacity: 0.5;
      cursor: default;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      display: block;
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .row {
      background: white;
      border-radius: 20px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 12px;
    }

    .row-head {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .row-head .client {
      flex: 1 1 240px;
    }

    .row-head .planned {
      width: 90px;
    }

    .ticks {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .ticks label {
      display: inline-flex;
      gap: 6px;
      align-items: center;
      padding: 6px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      cursor: pointer;
    }

    .muted {
      color: #8b857d;
      font-size: 0.9rem;
    }

    .empty {
      text-align: center;
      padding: 40px 16px;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Planificador de Fletes</h1>
      <div class="toolbar">
        <label for="date">Fecha</label>
        <input id="date" type="date" value="{{DATE}}" />
        <button id="add" class="primary" type="button">+ Cliente</button>
        <button id="export" type="button">Exportar CSV</button>
      </div>
    </header>

    <section class="panel">
      <div class="stat"><span class="label">Planificados</span><span id="total-planned" class="value">0</span></div>
      <div class="stat"><span class="label">Entregados</span><span id="total-delivered" class="value">0</span></div>
      <div class="stat"><span class="label">Pendientes</span><span id="total-remaining" class="value">0</span></div>
    </section>

    <section class="duplicate">
      <span class="muted">Duplicar plan desde:</span>
      <select id="dup-from"><option value="">Seleccionar fecha…</option></select>
      <button id="dup" type="button" disabled>Duplicar</button>
    </section>

    <div id="status" class="status" role="status"></div>
    <section id="rows"></section>
  </main>

  <script>
    const dateEl = document.getElementById('date');
    const rowsEl = document.getElementById('rows');
    const statusEl = document.getElementById('status');
    const dupFromEl = document.getElementById('dup-from');
    const dupBtn = document.getElementById('dup');

    const setStatus = (text, type) => {
      statusEl.textContent = text;
      statusEl.dataset.type = type || '';
    };

    const dayUrl = (path) => `/api/day${path}?date=${encodeURIComponent(dateEl.value)}`;

    const request = async (method, path, body) => {
      const res = await fetch(dayUrl(path), {
        method,
        headers: body === undefined ? {} : { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        let message = 'Request failed';
        try {
          message = (await res.json()).error || message;
        } catch (_) {}
        throw new Error(message);
      }
      return res.json();
    };

    const el = (tag, attrs, children) => {
      const node = document.createElement(tag);
      Object.entries(attrs || {}).forEach(([key, value]) => {
        if (key === 'text') {
          node.textContent = value;
        } else if (key.startsWith('on')) {
          node.addEventListener(key.slice(2), value);
        } else {
          node[key] = value;
        }
      });
      (children || []).forEach((child) => node.appendChild(child));
      return node;
    };

    const run = (promise) => promise
      .then((day) => {
        render(day);
        return loadCandidates();
      })
      .catch((err) => setStatus(err.message, 'error'));

    const renderRow = (item) => {
      const delivered = item.ticks.filter(Boolean).length;
      const remaining = Math.max(0, item.planned - delivered);
      const path = `/records/${encodeURIComponent(item.id)}`;

      const ticks = item.ticks.length === 0
        ? [el('span', { className: 'muted', text: '(sin viajes planificados)' })]
        : item.ticks.map((done, i) => el('label', {}, [
            el('input', { type: 'checkbox', checked: done, onchange: () => run(request('POST', `${path}/ticks/${i}`)) }),
            el('span', { text: `Viaje ${i + 1}` })
          ]));

      return el('div', { className: 'row' }, [
        el('div', { className: 'row-head' }, [
          el('input', { className: 'client', placeholder: 'Cliente (ej. Panedile)', value: item.client,
            onchange: (e) => run(request('PATCH', path, { client: e.target.value })) }),
          el('label', { className: 'muted', text: 'Planificados' }),
          el('input', { className: 'planned', type: 'number', min: 0, value: item.planned,
            onchange: (e) => run(request('PUT', `${path}/planned`, { planned: e.target.value })) }),
          el('span', { className: 'muted', text: `Entregados: ${delivered} • Pendientes: ${remaining}` }),
          el('button', { type: 'button', text: 'Eliminar', title: 'Eliminar cliente del día',
            onclick: () => run(request('DELETE', path)) })
        ]),
        el('textarea', { placeholder: 'Notas (obra, materiales, patentes, restricción horaria, etc.)', value: item.notes,
          onchange: (e) => run(request('PATCH', path, { notes: e.target.value })) }),
        el('div', { className: 'muted', text: 'Marcá un ✓ por cada viaje enviado' }),
        el('div', { className: 'ticks' }, ticks)
      ]);
    };

    const render = (day) => {
      document.getElementById('total-planned').textContent = day.totals.planned;
      document.getElementById('total-delivered').textContent = day.totals.delivered;
      document.getElementById('total-remaining').textContent = day.totals.remaining;
      rowsEl.replaceChildren();
      if (day.list.length === 0) {
        rowsEl.appendChild(el('div', { className: 'row empty' }, [
          el('strong', { text: 'Sin clientes por hoy' }),
          el('p', { className: 'muted', text: 'Agregá tus clientes y definí cuántos viajes se planifican. Marcá cada envío con un ✓.' })
        ]));
      } else {
        day.list.forEach((item) => rowsEl.appendChild(renderRow(item)));
      }
      setStatus('', '');
    };

    const loadCandidates = async () => {
      const { candidates } = await request('GET', '/candidates');
      const selected = dupFromEl.value;
      dupFromEl.replaceChildren(el('option', { value: '', text: 'Seleccionar fecha…' }));
      candidates.forEach((d) => dupFromEl.appendChild(el('option', { value: d, text: d })));
      dupFromEl.value = candidates.includes(selected) ? selected : (candidates[0] || '');
      dupBtn.disabled = !dupFromEl.value;
    };

    const load = () => run(request('GET', ''));

    document.getElementById('add').addEventListener('click', () => run(request('POST', '/records')));
    document.getElementById('export').addEventListener('click', () => {
      window.location.href = dayUrl('/export');
    });
    dupFromEl.addEventListener('change', () => {
      dupBtn.disabled = !dupFromEl.value;
    });
    dupBtn.addEventListener('click', () => {
      if (dupFromEl.value) {
        run(request('POST', '/duplicate', { from: dupFromEl.value }));
      }
    });
    dateEl.addEventListener('change', load);

    load();
  </script>
</body>
</html>
"#;
