// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Static dashboard page served at `/`

/// Self-contained dashboard. It pulls `/api/stats` once for a first paint,
/// then follows `/ws`, reconnecting with capped exponential backoff and
/// keeping the last values on screen while offline.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>hostwatch</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: 'Courier New', monospace; background: #1a1a1a; color: #00ff00; padding: 20px; font-size: 14px; }
.container { max-width: 1200px; margin: 0 auto; }
.header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #00ff00; padding-bottom: 10px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; margin-bottom: 30px; }
.card { background: #2a2a2a; border: 1px solid #00ff00; border-radius: 5px; padding: 20px; }
.card.degraded { border-color: #ffaa00; }
.card h3 { margin-bottom: 15px; border-bottom: 1px solid #00ff00; padding-bottom: 5px; }
.metric { display: flex; justify-content: space-between; margin-bottom: 8px; padding: 5px 0; }
.progress-bar { width: 100%; height: 20px; background: #1a1a1a; border: 1px solid #00ff00; border-radius: 3px; overflow: hidden; margin-top: 5px; }
.progress-fill { height: 100%; width: 0; background: linear-gradient(90deg, #00ff00, #00cc00); transition: width 0.3s ease; }
.status { text-align: center; padding: 10px; margin-bottom: 20px; border-radius: 5px; }
.status.connected { background: rgba(0, 255, 0, 0.2); border: 1px solid #00ff00; }
.status.disconnected { background: rgba(255, 0, 0, 0.2); border: 1px solid #ff0000; color: #ff0000; }
.gpio-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(100px, 1fr)); gap: 10px; }
.gpio-pin { text-align: center; padding: 10px; border: 1px solid #00ff00; border-radius: 3px; background: #1a1a1a; }
.gpio-pin.high { background: rgba(0, 255, 0, 0.3); }
.gpio-pin.low { background: rgba(255, 0, 0, 0.2); border-color: #ff4444; }
.muted { color: #888; }
</style>
</head>
<body>
<div class="container">
  <div class="header">
    <h1>hostwatch</h1>
    <div class="muted">Last updated: <span id="timestamp">-</span></div>
  </div>
  <div id="status" class="status disconnected">Connecting...</div>
  <div class="grid">
    <div class="card" id="card-cpu">
      <h3>CPU</h3>
      <div class="metric"><span>Usage</span><span id="cpu-usage">-</span></div>
      <div class="progress-bar"><div class="progress-fill" id="cpu-bar"></div></div>
      <div class="metric"><span>Load (1/5/15m)</span><span id="cpu-load">-</span></div>
      <div class="metric"><span>Frequency</span><span id="cpu-freq">-</span></div>
    </div>
    <div class="card" id="card-memory">
      <h3>Memory</h3>
      <div class="metric"><span>Usage</span><span id="mem-usage">-</span></div>
      <div class="progress-bar"><div class="progress-fill" id="mem-bar"></div></div>
      <div class="metric"><span>Total</span><span id="mem-total">-</span></div>
      <div class="metric"><span>Used</span><span id="mem-used">-</span></div>
      <div class="metric"><span>Free</span><span id="mem-free">-</span></div>
      <div class="metric"><span>Available</span><span id="mem-avail">-</span></div>
    </div>
    <div class="card" id="card-disk">
      <h3>Disk</h3>
      <div class="metric"><span>Usage</span><span id="disk-usage">-</span></div>
      <div class="progress-bar"><div class="progress-fill" id="disk-bar"></div></div>
      <div class="metric"><span>Total</span><span id="disk-total">-</span></div>
      <div class="metric"><span>Used</span><span id="disk-used">-</span></div>
      <div class="metric"><span>Free</span><span id="disk-free">-</span></div>
      <div class="metric"><span>Reads since boot</span><span id="disk-reads">-</span></div>
      <div class="metric"><span>Writes since boot</span><span id="disk-writes">-</span></div>
    </div>
    <div class="card" id="card-temperature">
      <h3>Temperature</h3>
      <div class="metric"><span>CPU</span><span id="temp-cpu">-</span></div>
      <div class="metric"><span>GPU</span><span id="temp-gpu">-</span></div>
      <div class="metric"><span>Board</span><span id="temp-board">-</span></div>
      <div class="metric"><span>Ambient</span><span id="temp-ambient">-</span></div>
    </div>
  </div>
  <div class="card" id="card-gpio">
    <h3>GPIO Status</h3>
    <div class="gpio-grid" id="gpio-grid"><div class="muted">No GPIO data</div></div>
  </div>
</div>
<script>
const MAX_BACKOFF_MS = 30000;
let backoff = 1000;

function formatBytes(bytes) {
  const unit = 1024;
  if (bytes < unit) return bytes + ' B';
  let exp = Math.floor(Math.log(bytes) / Math.log(unit));
  exp = Math.min(exp, 6);
  return (bytes / Math.pow(unit, exp)).toFixed(1) + ' ' + 'KMGTPE'[exp - 1] + 'B';
}

function setText(id, text) { document.getElementById(id).textContent = text; }
function setBar(id, percent) { document.getElementById(id).style.width = Math.min(Math.max(percent, 0), 100) + '%'; }
function formatTemp(value) { return value > 0 ? value.toFixed(1) + ' °C' : 'n/a'; }

function render(stats) {
  const failed = stats.failed || [];
  for (const family of ['cpu', 'memory', 'disk', 'temperature', 'gpio']) {
    document.getElementById('card-' + family).classList.toggle('degraded', failed.includes(family));
  }

  setText('timestamp', new Date(stats.timestamp).toLocaleString());

  setText('cpu-usage', stats.cpu.usage_percent.toFixed(1) + '%');
  setBar('cpu-bar', stats.cpu.usage_percent);
  const load = stats.cpu.load_average || [];
  setText('cpu-load', load.length >= 3 ? load.map(l => l.toFixed(2)).join(' / ') : 'n/a');
  setText('cpu-freq', stats.cpu.frequency > 0 ? (stats.cpu.frequency / 1000).toFixed(2) + ' GHz' : 'n/a');

  setText('mem-usage', stats.memory.usage_percent.toFixed(1) + '%');
  setBar('mem-bar', stats.memory.usage_percent);
  setText('mem-total', formatBytes(stats.memory.total));
  setText('mem-used', formatBytes(stats.memory.used));
  setText('mem-free', formatBytes(stats.memory.free));
  setText('mem-avail', formatBytes(stats.memory.available));

  setText('disk-usage', stats.disk.usage_percent.toFixed(1) + '%');
  setBar('disk-bar', stats.disk.usage_percent);
  setText('disk-total', formatBytes(stats.disk.total));
  setText('disk-used', formatBytes(stats.disk.used));
  setText('disk-free', formatBytes(stats.disk.free));
  setText('disk-reads', stats.disk.io_read.toLocaleString());
  setText('disk-writes', stats.disk.io_write.toLocaleString());

  setText('temp-cpu', formatTemp(stats.temperature.cpu));
  setText('temp-gpu', formatTemp(stats.temperature.gpu));
  setText('temp-board', formatTemp(stats.temperature.board));
  setText('temp-ambient', formatTemp(stats.temperature.ambient));

  const grid = document.getElementById('gpio-grid');
  const pins = Object.values((stats.gpio && stats.gpio.pins) || {});
  grid.innerHTML = '';
  if (pins.length === 0) {
    grid.innerHTML = '<div class="muted">No GPIO data</div>';
  }
  for (const pin of pins) {
    const cell = document.createElement('div');
    cell.className = 'gpio-pin ' + (pin.value === 1 ? 'high' : 'low');
    cell.textContent = pin.pin + ': ' + pin.value + ' (' + pin.mode + ')';
    grid.appendChild(cell);
  }
}

function setStatus(connected, text) {
  const el = document.getElementById('status');
  el.className = 'status ' + (connected ? 'connected' : 'disconnected');
  el.textContent = text;
}

function connect() {
  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const ws = new WebSocket(scheme + location.host + '/ws');

  ws.onopen = () => {
    backoff = 1000;
    setStatus(true, 'Connected - live updates');
  };
  ws.onmessage = (event) => {
    try { render(JSON.parse(event.data)); } catch (e) { console.error('Bad snapshot', e); }
  };
  ws.onclose = () => {
    setStatus(false, 'Disconnected - retrying in ' + Math.round(backoff / 1000) + 's (showing last values)');
    setTimeout(connect, backoff);
    backoff = Math.min(backoff * 2, MAX_BACKOFF_MS);
  };
  ws.onerror = () => ws.close();
}

fetch('/api/stats').then(r => r.ok ? r.json() : null).then(s => { if (s) render(s); }).catch(() => {});
connect();
</script>
</body>
</html>
"##;
